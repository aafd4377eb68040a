//! Filesystem content scanner for navcheck.
//!
//! This crate provides [`Scanner`], which walks a documentation source
//! directory and collects its markdown pages, plus the static assets under
//! `public`, into a [`ContentIndex`](navcheck_site::ContentIndex).
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use navcheck_fs::Scanner;
//!
//! let content = Scanner::new(PathBuf::from("docs"))
//!     .with_excludes(&["node_modules/**"])?
//!     .scan()?;
//! for page in content.iter() {
//!     println!("{page}");
//! }
//! # Ok(())
//! # }
//! ```

mod scanner;

pub use scanner::{ScanError, Scanner};
