use crate::error::SinkError;
use crate::records::Declaration;

use super::Sink;

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    records: Vec<Declaration>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Declaration] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Declaration> {
        self.records
    }
}

impl Sink for CollectingSink {
    fn accept(&mut self, record: Declaration) -> Result<(), SinkError> {
        self.records.push(record);
        Ok(())
    }
}
