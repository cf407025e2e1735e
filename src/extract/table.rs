use scraper::{ElementRef, Html, Selector};

use super::ExtractError;
use crate::common::Row;

/// Identifies one table in a page by tag name and attribute predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLocator {
    pub tag: &'static str,
    pub id: Option<&'static str>,
    pub classes: &'static [&'static str],
}

impl TableLocator {
    /// Publication table of a bibliography page
    pub const BIBLIOGRAPHY: TableLocator = TableLocator {
        tag: "table",
        id: None,
        classes: &["infotabelle"],
    };

    /// Table on the graduated PhDs page of the computer science department
    pub const GRADUATED_PHDS: TableLocator = TableLocator {
        tag: "table",
        id: None,
        classes: &["farbe_lichtblau", "breite100"],
    };

    /// CSS form of the locator: tag, then `#id`, then `.class` for each class
    pub fn css(&self) -> String {
        let mut css = self.tag.to_string();
        if let Some(id) = self.id {
            css.push('#');
            css.push_str(id);
        }
        for class in self.classes {
            css.push('.');
            css.push_str(class);
        }
        css
    }
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css.to_string()))
}

/// Trimmed text of an element and all its descendants
pub(crate) fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parse `html` and return the rows of the located table
pub fn extract_rows(html: &str, locator: &TableLocator) -> Result<Vec<Row>, ExtractError> {
    let document = Html::parse_document(html);
    rows_from_document(&document, locator)
}

/// Rows (`tr`) of the located table's body, each the ordered `td` texts.
/// Empty cells are kept so columns stay aligned; width checks happen later.
pub fn rows_from_document(document: &Html, locator: &TableLocator) -> Result<Vec<Row>, ExtractError> {
    let css = locator.css();
    let table_sel = parse_selector(&css)?;
    let body_sel = parse_selector("tbody")?;
    let row_sel = parse_selector("tr")?;
    let cell_sel = parse_selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| ExtractError::TableNotFound(css.clone()))?;
    let body = table
        .select(&body_sel)
        .next()
        .ok_or(ExtractError::BodyNotFound(css))?;

    Ok(body
        .select(&row_sel)
        .map(|tr| tr.select(&cell_sel).map(cell_text).collect())
        .collect())
}
