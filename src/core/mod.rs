//! Macro extraction engine.
//!
//! ## Module Structure
//!
//! - `scanner`: textual pre-check for the marker name
//! - `parsers`: script block discovery and swc parsing
//! - `locate`: top-level call-site discovery
//! - `scope`: reference collection and scope validation
//! - `imports`: import liveness and pruning
//! - `emit`: output assembly
//! - `transform`: the `transform` / `extract_config` entry points
//! - `file_scanner`, `pages`: batch extraction over a routes folder

pub mod emit;
pub mod error;
pub mod file_scanner;
pub mod imports;
pub mod locate;
pub mod pages;
pub mod parsers;
pub mod scanner;
pub mod scope;
pub mod source;
pub mod transform;
pub mod warnings;

pub use error::{MacroError, Stage};
pub use pages::{PageEntry, PageIndex, collect_page_configs};
pub use source::{DEFAULT_MACRO_NAME, FileKind, MacroOptions, RequestVariant, SourceUnit};
pub use transform::{Outcome, PageConfig, extract_config, transform};
pub use warnings::{MemorySink, StderrSink, WarningSink};
