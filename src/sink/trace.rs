//! Raw-text trace output for debugging the front end.

use std::io::Write;

use crate::error::SinkError;
use crate::records::Declaration;
use crate::syntax::Span;

use super::Sink;

/// Writes the source text behind every record and class member.
///
/// Each line is `<kind> <line>:<column> <text>`, with runs of whitespace in
/// the text collapsed to a single space. Members are indented under their
/// class.
pub struct TraceSink<'src, W: Write> {
    source: &'src str,
    out: W,
}

impl<'src, W: Write> TraceSink<'src, W> {
    pub fn new(source: &'src str, out: W) -> Self {
        Self { source, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, indent: &str, kind: &str, span: Span) -> Result<(), SinkError> {
        let text = collapse_whitespace(span.text(self.source));
        writeln!(self.out, "{}{} {} {}", indent, kind, span, text)?;
        Ok(())
    }
}

impl<W: Write> Sink for TraceSink<'_, W> {
    fn accept(&mut self, record: Declaration) -> Result<(), SinkError> {
        self.line("", record.kind().as_str(), record.span())?;
        if let Declaration::Class(class) = &record {
            for field in &class.fields {
                self.line("  ", "field", field.span)?;
            }
            for method in &class.methods {
                self.line("  ", "method", method.span)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::extract;
    use crate::syntax::parse;

    #[test]
    fn test_trace_prints_source_text() {
        let source = "package pkg.sample\n\nclass Account {\n    balance:   Int\n    fun withdraw(amount: Int) {\n        pay(amount)\n    }\n}\n";
        let tree = parse(source).unwrap();
        let sink = extract(&tree, TraceSink::new(source, Vec::new())).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], "package 1:9 pkg.sample");
        assert!(lines[1].starts_with("class 3:1 class Account { balance: Int"));
        assert_eq!(lines[2], "  field 4:5 balance: Int");
        assert_eq!(
            lines[3],
            "  method 5:5 fun withdraw(amount: Int) { pay(amount) }"
        );
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b  c"), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }
}
