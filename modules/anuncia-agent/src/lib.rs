pub mod draft;
pub mod error;
pub mod research;
pub mod traits;

#[cfg(test)]
pub mod testing;


pub use error::{ResearchError, Result};
pub use research::Researcher;
