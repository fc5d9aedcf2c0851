//! This crate turns the entries of a `.bib` file into Markdown pages
//! with front matter, one page per entry, as used by static-site
//! generators like Hugo for a publication list.
//!
//! An entry like this one
//!
//! ```tex
//! @inproceedings{doe2023,
//!     author    = "Doe, Jane and Smith, John",
//!     title     = "Hello, World! A Study",
//!     booktitle = "Proceedings of Things",
//!     year      = "2023",
//!     month     = "7"
//! }
//! ```
//!
//! becomes `hello-world-a-study.md` with title, date `2023-07-01`,
//! pubtype `Conference Paper`, authors `Jane Doe` and `John Smith` and so on.
//!
//! The pipeline is strictly one-directional: [`Parser`] yields raw
//! [`BibEntry`] values, [`Publication::from_entry`] derives the display
//! fields, and [`Writer`] persists one file per record.
//!
//! ```rust
//! use bib2md::{Parser, Publication};
//! use std::str::FromStr;
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let p = Parser::from_str("@article{tolkien1937,\n  title = \"The Hobbit\"\n}")?;
//!     for entry in p.iter() {
//!         let publication = Publication::from_entry(&entry);
//!         println!("{} -> {}", entry.id, publication.file_name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Entries are located with a regular expression by default. It ends an
//! entry at the first `}`, so only `"quoted"` values survive in practice.
//! [`Extraction::Balanced`] counts brace nesting instead and also accepts
//! `{braced}` values. Neither mode expands `@string` macros or TeX escapes.

mod errors;
mod lexer;
pub mod normalize;
mod parser;
mod types;
pub mod writer;

pub use crate::errors::ConvertError;
pub use crate::lexer::Extraction;
pub use crate::parser::{parse_fields, BibEntries, Parser};
pub use crate::types::{BibEntry, Publication};
pub use crate::writer::Writer;
