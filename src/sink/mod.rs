//! Record sinks.
//!
//! A [`Sink`] receives records in the order the listener produces them. It
//! must not reorder or drop them. All calls are synchronous.

mod collect;
mod text;
mod trace;

pub use collect::CollectingSink;
pub use text::TextSink;
pub use trace::TraceSink;

use crate::error::SinkError;
use crate::records::Declaration;

/// Destination for extracted declarations.
pub trait Sink {
    fn accept(&mut self, record: Declaration) -> Result<(), SinkError>;

    /// Called once after a successful walk.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn accept(&mut self, record: Declaration) -> Result<(), SinkError> {
        (**self).accept(record)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn accept(&mut self, record: Declaration) -> Result<(), SinkError> {
        (**self).accept(record)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}
