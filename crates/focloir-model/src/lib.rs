pub mod word;
pub mod enrichment;
pub mod deck;
pub mod error;

pub use word::*;
pub use enrichment::*;
pub use deck::*;
pub use error::*;
