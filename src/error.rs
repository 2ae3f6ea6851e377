//! Error types for parsing, extraction and emission.
//!
//! Every fault aborts the walk of the file it occurred in; nothing is
//! retried or logged-and-skipped inside the listener.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::listener::NodeKind;
use crate::syntax::Span;

/// The grammar rejected the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{span}: syntax error: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A sink could not accept a record.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while walking a tree and emitting records.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A node lacks a token the grammar makes mandatory.
    #[error("{span}: malformed {kind}{}: missing {missing}", InClass(.class))]
    MalformedNode {
        kind: NodeKind,
        span: Span,
        missing: &'static str,
        /// Enclosing class, for field and method nodes.
        class: Option<String>,
    },
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl ExtractError {
    pub fn malformed(kind: NodeKind, span: Span, missing: &'static str) -> Self {
        ExtractError::MalformedNode {
            kind,
            span,
            missing,
            class: None,
        }
    }

    /// Attach the enclosing class name to a malformed member fault.
    pub fn in_class(self, name: &str) -> Self {
        match self {
            ExtractError::MalformedNode {
                kind,
                span,
                missing,
                class: None,
            } => ExtractError::MalformedNode {
                kind,
                span,
                missing,
                class: Some(name.to_string()),
            },
            other => other,
        }
    }

    /// Whether this is a malformed-node fault (as opposed to an output fault).
    pub fn is_malformed(&self) -> bool {
        matches!(self, ExtractError::MalformedNode { .. })
    }
}

struct InClass<'a>(&'a Option<String>);

impl fmt::Display for InClass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, " in class {}", name),
            None => Ok(()),
        }
    }
}

/// Why a single file could not be extracted.
#[derive(Error, Debug)]
pub enum FileErrorKind {
    #[error("failed to read file: {0}")]
    Read(#[from] io::Error),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// A per-file failure, naming the file.
#[derive(Error, Debug)]
#[error("{path}{}{kind}", separator(.kind))]
pub struct FileError {
    pub path: String,
    #[source]
    pub kind: FileErrorKind,
}

fn separator(kind: &FileErrorKind) -> &'static str {
    match kind {
        FileErrorKind::Read(_) => ": ",
        FileErrorKind::Syntax(_) | FileErrorKind::Extract(_) => ":",
    }
}

impl FileError {
    pub fn new(path: impl Into<String>, kind: impl Into<FileErrorKind>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
        }
    }
}
