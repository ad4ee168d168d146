//! Utility functions shared by the index and the note store.
//!
//! ## Modules
//!
//! - [`app_data`] - Application data directory and config file (XDG-compliant)
//! - [`progress`] - Progress spinner, no-op without the `progress` feature
//! - [`trigram`] - Whitespace-token trigram generation
//!
//! ## Key Functions
//!
//! ```
//! use velocity::utils::generate_trigrams;
//!
//! // Trigrams never cross whitespace: "lo w" is not produced
//! let trigrams = generate_trigrams("Hello World");
//! assert_eq!(trigrams.len(), 6); // hel ell llo wor orl rld
//! ```

pub mod app_data;
pub mod progress;
pub mod trigram;

pub use app_data::*;
pub use trigram::*;
