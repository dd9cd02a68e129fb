use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::config::constants::CONNECT_TIMEOUT;

/// The one client every request in a run goes through.
pub fn basic() -> reqwest::Result<Client> {
    Client::builder().connect_timeout(CONNECT_TIMEOUT).build()
}

/// A parsed document, queried with CSS selectors.
pub struct Page(Html);

impl Page {
    pub fn parse(markup: &str) -> Self {
        Self(Html::parse_document(markup))
    }

    /// All matches in document order.
    pub fn find<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = Node<'a>> {
        self.0.select(selector).map(Node)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// Descendants matching `selector`, in document order.
    pub fn find(self, selector: &'a Selector) -> impl Iterator<Item = Self> {
        self.0.select(selector).map(Node)
    }

    /// Concatenated text of every descendant text node, untrimmed.
    pub fn text(self) -> String {
        self.0.text().collect()
    }

    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.0.attr(name)
    }

    pub fn parent(self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(Node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal() {
        let page = Page::parse(
            r#"<table><tr><td class="a"> x <b>y</b></td><td><a href="z">link</a></td></tr></table>"#,
        );
        let sel_a = Selector::parse(".a").unwrap();
        let sel_link = Selector::parse("a").unwrap();
        let sel_tr = Selector::parse("tr").unwrap();

        let cell = page.find(&sel_a).next().unwrap();
        assert_eq!(cell.text(), " x y");
        assert_eq!(cell.attr("class"), Some("a"));
        assert_eq!(cell.attr("href"), None);

        let row = cell.parent().unwrap();
        assert_eq!(Some(row), page.find(&sel_tr).next());
        let link = row.find(&sel_link).next().unwrap();
        assert_eq!(link.attr("href"), Some("z"));
    }
}
