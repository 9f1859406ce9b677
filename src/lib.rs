//! pagemacro - static `definePage()` extraction for page components
//!
//! Finds the `definePage({...})` call in the setup code of a Vue single-file
//! component or a JSX/TSX page, and either strips it from the source or lifts
//! its configuration object into a standalone module with only the imports it
//! needs. The source is parsed, never executed, and malformed input never
//! makes the engine fail.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: The extraction engine
//! - `host`: Async entry points for build hosts

pub mod cli;
pub mod config;
pub mod core;
pub mod host;
