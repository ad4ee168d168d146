pub mod shared;
pub mod trigram_index;
pub mod types;

pub use shared::SharedIndex;
pub use trigram_index::TrigramIndex;
pub use types::*;
