use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

use super::{CitationSource, QueryError, SourceTag};
use crate::fetch::create_client;

pub const CROSSREF_WORKS_URL: &str = "https://api.crossref.org/works";

/// Citation counts from the Crossref works endpoint (`is-referenced-by-count`)
pub struct CrossrefSource {
    client: Client,
    works_url: String,
    mailto: Option<String>,
}

impl CrossrefSource {
    pub fn new(timeout: Duration, mailto: Option<String>) -> reqwest::Result<Self> {
        let user_agent = match &mailto {
            Some(email) => format!("uol-bibliography/{} (mailto:{})", env!("CARGO_PKG_VERSION"), email),
            None => format!("uol-bibliography/{}", env!("CARGO_PKG_VERSION")),
        };
        Ok(Self {
            client: create_client(&user_agent, timeout, None)?,
            works_url: CROSSREF_WORKS_URL.to_string(),
            mailto,
        })
    }
}

/// Free-text query: title and author separated by one space
pub fn crossref_query(author: &str, title: &str) -> String {
    format!("{} {}", title, author)
}

/// Citation count of the first item of a works search response
pub fn parse_works_response(data: &Value) -> Result<u64, QueryError> {
    let items = data["message"]["items"]
        .as_array()
        .ok_or(QueryError::MissingField("message.items"))?;
    let first = items.first().ok_or(QueryError::NoResults)?;
    first["is-referenced-by-count"]
        .as_u64()
        .ok_or(QueryError::MissingField("is-referenced-by-count"))
}

impl CitationSource for CrossrefSource {
    fn tag(&self) -> SourceTag {
        SourceTag::Crossref
    }

    fn citations(&mut self, author: &str, title: &str) -> Result<u64, QueryError> {
        let query = crossref_query(author, title);
        debug!("Crossref query: {}", query);

        let mut params = vec![("query", query.as_str()), ("rows", "1")];
        if let Some(email) = &self.mailto {
            params.push(("mailto", email.as_str()));
        }

        let resp = self.client.get(&self.works_url).query(&params).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(QueryError::Status(status.as_u16()));
        }

        let data: Value = resp.json()?;
        parse_works_response(&data)
    }
}
