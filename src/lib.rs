//! visionscan - declaration extraction for Vision sources.
//!
//! Parses Vision files and reports the package, classes (with their fields
//! and methods) and interfaces each one declares.
//!
//! # Architecture
//!
//! - `syntax`: lexer, combinator parser and the typed parse tree
//! - `listener`: depth-first tree walk and the declaration extractor
//! - `records`: the extracted declaration records
//! - `sink`: destinations for records (text lines, memory, raw trace)
//! - `runner`: file discovery and parallel per-file extraction
//! - `config`: YAML configuration
//! - `report`: output formatting (text, pretty, JSON, trace)
//!
//! # Example
//!
//! ```
//! use visionscan::{extract, parse, TextSink};
//!
//! let tree = parse("package pkg.sample\ninterface Shape {}").unwrap();
//! let sink = extract(&tree, TextSink::new(Vec::new())).unwrap();
//! let text = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(text, "File is in package: pkg.sample\nInterface Name: Shape\n");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod listener;
pub mod records;
pub mod report;
pub mod runner;
pub mod sink;
pub mod syntax;

pub use config::Config;
pub use error::{ExtractError, FileError, FileErrorKind, SinkError, SyntaxError};
pub use listener::{extract, walk, DeclarationExtractor, Node, NodeKind, TreeListener};
pub use records::{
    ClassDeclaration, Declaration, DeclarationKind, FieldDeclaration, InterfaceDeclaration,
    MethodDeclaration, PackageDeclaration,
};
pub use runner::{collect_files, extract_source, ExtractionResult, FileExtraction, Runner};
pub use sink::{CollectingSink, Sink, TextSink, TraceSink};
pub use syntax::{parse, SyntaxTree};
