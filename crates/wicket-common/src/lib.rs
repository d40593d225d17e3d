//! Common utilities for the wicket HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - deduplicated, colored terminal diagnostics

pub mod warning;
