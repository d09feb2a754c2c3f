//! The fillgen fixture generation tool.
//!
//! This library supports the fillgen binary found elsewhere in this project.
//! It writes a single text file of numbered filler lines, bracketed by a
//! header and a footer, until the file has grown past a target size. The
//! resulting files are disposable inputs for upload, streaming and large-file
//! viewer tests.

#![deny(clippy::all)]
#![deny(clippy::cargo)]
#![deny(clippy::pedantic)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
#![deny(clippy::dbg_macro)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_docs)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod filler;
