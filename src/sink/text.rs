//! The plain-text layout, one line per fact.

use std::io::Write;

use crate::error::SinkError;
use crate::records::{ClassDeclaration, Declaration};

use super::Sink;

/// Writes records in the line layout:
///
/// ```text
/// File is in package: pkg.sample
/// Class Name: Account
/// Class Account has argument balance with type Int
/// Class Account has function withdraw
/// Interface Name: Shape
/// ```
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_class(&mut self, class: &ClassDeclaration) -> Result<(), SinkError> {
        writeln!(self.out, "Class Name: {}", class.name)?;
        for field in &class.fields {
            writeln!(
                self.out,
                "Class {} has argument {} with type {}",
                class.name, field.name, field.ty
            )?;
        }
        for method in &class.methods {
            writeln!(self.out, "Class {} has function {}", class.name, method.name)?;
        }
        Ok(())
    }
}

impl<W: Write> Sink for TextSink<W> {
    fn accept(&mut self, record: Declaration) -> Result<(), SinkError> {
        match &record {
            Declaration::Package(package) => {
                writeln!(self.out, "File is in package: {}", package.name)?
            }
            Declaration::Class(class) => self.write_class(class)?,
            Declaration::Interface(interface) => {
                writeln!(self.out, "Interface Name: {}", interface.name)?
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
