//! # Velocity - trigram note search
//!
//! Velocity keeps a directory of plain-text notes searchable from the
//! terminal. Notes are loaded at startup into an in-memory trigram index;
//! a query matches the notes that contain every trigram of the query.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - The trigram inverted index and its thread-safe wrapper
//! - [`notes`] - Note discovery, the note store, editor launching
//! - [`output`] - Terminal formatting of listings and previews
//! - [`shell`] - Line-oriented interactive search loop
//! - [`utils`] - Trigram generation, config file, progress spinner
//!
//! ## Quick Start
//!
//! ```
//! use velocity::index::TrigramIndex;
//!
//! let mut index = TrigramIndex::new();
//! assert_eq!(index.add("foo bar"), 0);
//! assert_eq!(index.add("foo baz"), 1);
//!
//! assert_eq!(index.search_ids("foo"), [0, 1]);
//! assert_eq!(index.search_ids("baz"), [1]);
//!
//! // Queries need at least one token of 3+ chars
//! assert!(index.search("ba").is_empty());
//! ```
//!
//! ## Matching rules
//!
//! Text is lowercased and split on whitespace; each token contributes the
//! 3-char windows it contains. Trigrams never span two words, so
//! `"helloworld"` does not match a note containing `"hello world"`.
//! Notes shorter than 3 chars per word are indexed but can never be found.

pub mod index;
pub mod notes;
pub mod output;
pub mod shell;
pub mod utils;
