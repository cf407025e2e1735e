use scraper::Html;

use super::table::parse_selector;

/// Container of the page heading on bibliography pages
const HEADING_CSS: &str = "div#inhalt.floatbox h1";

/// Text of the page's main heading, its text pieces joined by single spaces
pub fn page_heading(document: &Html) -> Option<String> {
    let selector = parse_selector(HEADING_CSS).ok()?;
    let heading = document.select(&selector).next()?;
    Some(heading.text().collect::<Vec<_>>().join(" "))
}
