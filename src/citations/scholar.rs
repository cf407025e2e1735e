use lazy_static::lazy_static;
use log::{debug, error};
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::time::Duration;

use super::{CitationSource, QueryError, SourceTag};
use crate::fetch::create_client;

pub const SCHOLAR_SEARCH_URL: &str = "https://scholar.google.com/scholar";

lazy_static! {
    // One search result (title, snippet and footer links)
    static ref RESULT_SELECTOR: Selector = Selector::parse("div.gs_ri").unwrap();

    // Footer links of a result: "Cited by N", "Related articles", versions
    static ref FOOTER_LINK_SELECTOR: Selector = Selector::parse("div.gs_fl a").unwrap();

    static ref CITED_BY_PATTERN: Regex = Regex::new(r"Cited by (\d+)").unwrap();
}

/// A client bound to one proxy of the rotation
struct ProxyRoute {
    proxy: String,
    client: Client,
}

/// Citation counts scraped from the search engine's advanced search page.
///
/// With proxies configured every query goes through a randomly chosen one; a
/// proxy whose answer holds no result is dropped for the rest of the run.
/// Once the rotation is empty, queries go out directly.
pub struct ScholarSource {
    direct: Client,
    routes: Vec<ProxyRoute>,
    search_url: String,
}

impl ScholarSource {
    pub fn new(user_agent: &str, timeout: Duration, proxies: &[String]) -> reqwest::Result<Self> {
        let routes = proxies
            .iter()
            .map(|proxy| {
                Ok(ProxyRoute {
                    proxy: proxy.clone(),
                    client: create_client(user_agent, timeout, Some(proxy.as_str()))?,
                })
            })
            .collect::<reqwest::Result<Vec<_>>>()?;

        Ok(Self {
            direct: create_client(user_agent, timeout, None)?,
            routes,
            search_url: SCHOLAR_SEARCH_URL.to_string(),
        })
    }

    pub fn proxies_left(&self) -> usize {
        self.routes.len()
    }
}

/// Structured query terms: title words and author as separate fields
pub fn scholar_query<'a>(author: &'a str, title: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        ("as_q", title),
        ("as_sauthors", author),
        ("as_occt", "any"),
        ("hl", "en"),
    ]
}

/// Citation count of the first result on a results page. A first result
/// without a "Cited by" link counts as zero citations.
pub fn parse_results_page(html: &str) -> Result<u64, QueryError> {
    let document = Html::parse_document(html);
    let first = document
        .select(&RESULT_SELECTOR)
        .next()
        .ok_or(QueryError::NoResults)?;

    let cited_by = first
        .select(&FOOTER_LINK_SELECTOR)
        .filter_map(|link| {
            let text: String = link.text().collect();
            CITED_BY_PATTERN
                .captures(&text)
                .and_then(|caps| caps[1].parse::<u64>().ok())
        })
        .next();

    Ok(cited_by.unwrap_or(0))
}

impl CitationSource for ScholarSource {
    fn tag(&self) -> SourceTag {
        SourceTag::Scholar
    }

    fn citations(&mut self, author: &str, title: &str) -> Result<u64, QueryError> {
        let route = if self.routes.is_empty() {
            None
        } else {
            Some(fastrand::usize(..self.routes.len()))
        };
        let client = match route {
            Some(index) => {
                debug!("Scholar query via proxy {}", self.routes[index].proxy);
                &self.routes[index].client
            }
            None => &self.direct,
        };

        let resp = client
            .get(&self.search_url)
            .query(&scholar_query(author, title))
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(QueryError::Status(status.as_u16()));
        }

        let result = parse_results_page(&resp.text()?);
        if let (Err(QueryError::NoResults), Some(index)) = (&result, route) {
            let removed = self.routes.remove(index);
            error!(
                "Remove proxy (Google Scholar): {}. Proxies left: {}",
                removed.proxy,
                self.proxies_left()
            );
        }
        result
    }
}
