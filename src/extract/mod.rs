pub mod page;
pub mod table;

pub use page::*;
pub use table::*;

use thiserror::Error;

/// Why the expected structure could not be found in a document
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector '{0}'")]
    Selector(String),
    #[error("table '{0}' not found")]
    TableNotFound(String),
    #[error("table '{0}' has no body")]
    BodyNotFound(String),
}
