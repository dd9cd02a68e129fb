use std::{collections::BTreeMap, sync::LazyLock};

use scraper::Selector;

use crate::{
    error::{Error, Result},
    scrape::{Node, Page},
    util::join_url,
};

/// Header of the snatch-list section ("upload/download history").
pub const HISTORY_MARKER: &str = "היסטוריית העלאה/הורדה";
/// Visible text of the link leading to the delete confirmation ("delete").
pub const DELETE_LABEL: &str = "מחק";
/// Exact content of the HnR column for a flagged row.
pub const HNR_FLAG: &str = "Yes";

/// Hidden inputs of the delete confirmation form.
pub type FormFields = BTreeMap<String, String>;

static SEL_THEAD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table .thead").unwrap());
static SEL_TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static SEL_HNR_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td:nth-child(9)").unwrap());
static SEL_THREADLINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".threadlink").unwrap());
static SEL_A: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static SEL_A_HREF: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static SEL_HIDDEN: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"form[name="delhnr"] input[type="hidden"]"#).unwrap()
});

fn threadlink_href(row: Node<'_>) -> Option<&str> {
    let link = row.find(&SEL_THREADLINK).next()?;
    link.attr("href")
        .or_else(|| link.find(&SEL_A_HREF).next()?.attr("href"))
}

/// Detail-page URLs of every flagged row in the history table, in document order.
pub fn candidates(page: &Page, base: &str) -> Vec<String> {
    let mut sections = Vec::new();
    for thead in page.find(&SEL_THEAD) {
        if !thead.text().contains(HISTORY_MARKER) {
            continue;
        }
        let Some(section) = thead.parent().and_then(Node::parent) else {
            continue;
        };
        if !sections.contains(&section) {
            sections.push(section);
        }
    }

    let mut seen = Vec::new();
    let mut hrefs = Vec::new();
    for row in sections.into_iter().flat_map(|s| s.find(&SEL_TR)) {
        if seen.contains(&row) {
            continue;
        }
        seen.push(row);

        let flag = row.find(&SEL_HNR_CELL).map(Node::text).collect::<String>();
        if flag != HNR_FLAG {
            continue;
        }
        if let Some(href) = threadlink_href(row) {
            hrefs.push(join_url(base, href));
        }
    }
    hrefs
}

/// URL behind the first link labelled [`DELETE_LABEL`].
pub fn delete_link(page: &Page, base: &str) -> Result<String> {
    page.find(&SEL_A)
        .find(|a| a.text().trim() == DELETE_LABEL)
        .and_then(|a| a.attr("href"))
        .map(|href| join_url(base, href))
        .ok_or(Error::LinkNotFound(DELETE_LABEL))
}

/// Hidden inputs of the `delhnr` form; later duplicates overwrite earlier ones.
pub fn form_fields(page: &Page) -> Result<FormFields> {
    let fields = page
        .find(&SEL_HIDDEN)
        .map(|input| {
            (
                input.attr("name").unwrap_or_default().to_owned(),
                input.attr("value").unwrap_or_default().to_owned(),
            )
        })
        .collect::<FormFields>();

    if fields.is_empty() {
        Err(Error::NoFormDetails)
    } else {
        Ok(fields)
    }
}
