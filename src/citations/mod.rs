pub mod crossref;
pub mod enricher;
pub mod merge;
pub mod scholar;
pub mod store;

#[cfg(test)]
pub mod mock;

pub use crossref::CrossrefSource;
pub use enricher::*;
pub use merge::*;
pub use scholar::ScholarSource;
pub use store::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which external provider a citation count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
pub enum SourceTag {
    /// Crossref-style DOI registry
    #[serde(rename = "CR")]
    #[value(name = "cr")]
    Crossref,
    /// Academic search engine (Google Scholar)
    #[serde(rename = "GS")]
    #[value(name = "gs")]
    Scholar,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Crossref => "CR",
            SourceTag::Scholar => "GS",
        }
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a citation source could not deliver a count for a record
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("no results")]
    NoResults,
    #[error("response is missing '{0}'")]
    MissingField(&'static str),
}

/// An external service that reports how often a publication is cited
pub trait CitationSource {
    fn tag(&self) -> SourceTag;

    /// Citation count of the first publication matching `author` and `title`
    fn citations(&mut self, author: &str, title: &str) -> Result<u64, QueryError>;
}
