//! Scripted citation source for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{CitationSource, QueryError, SourceTag};

/// Answers from a title → count table; unknown titles fail with
/// [`QueryError::NoResults`]. Every queried title is appended to a shared log.
pub struct MockSource {
    tag: SourceTag,
    counts: HashMap<String, u64>,
    log: Rc<RefCell<Vec<(SourceTag, String)>>>,
}

impl MockSource {
    pub fn new(tag: SourceTag, log: Rc<RefCell<Vec<(SourceTag, String)>>>) -> Self {
        Self {
            tag,
            counts: HashMap::new(),
            log,
        }
    }

    pub fn with_count(mut self, title: &str, count: u64) -> Self {
        self.counts.insert(title.to_string(), count);
        self
    }
}

impl CitationSource for MockSource {
    fn tag(&self) -> SourceTag {
        self.tag
    }

    fn citations(&mut self, _author: &str, title: &str) -> Result<u64, QueryError> {
        self.log.borrow_mut().push((self.tag, title.to_string()));
        self.counts.get(title).copied().ok_or(QueryError::NoResults)
    }
}
