pub mod http;

pub use http::*;

use thiserror::Error;

/// Why a document could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Capability to retrieve the text of a document by URL
pub trait DocumentFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned documents; unknown URLs answer with HTTP 404
    #[derive(Default)]
    pub struct MockFetcher {
        pages: HashMap<String, String>,
        pub requested: RefCell<Vec<String>>,
    }

    impl MockFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl DocumentFetcher for MockFetcher {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }
}
