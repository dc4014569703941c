use scraper::{html::Select, Html, Selector};

/// Parsed snapshot of a fetched page.
///
/// Keeps both the parsed DOM tree and the raw markup it was built from: the
/// selector-based sniffers query the tree, while the regex-based ones
/// (TechStack, Comments) scan the serialized source. The snapshot is immutable
/// once constructed; stylesheet inlining happens on the markup string before
/// parsing (see [`crate::fetch::fetch_page`]).
#[derive(Debug)]
pub struct Page {
    raw: String,
    doc: Html,
}

impl Page {
    /// Parse an HTML document into an immutable page snapshot.
    pub fn parse(html: &str) -> Self {
        Self {
            raw: html.to_string(),
            doc: Html::parse_document(html),
        }
    }

    /// The markup the page was parsed from.
    pub fn html(&self) -> &str {
        &self.raw
    }

    /// Iterate over elements matching a CSS selector.
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.doc.select(selector)
    }

    /// Number of elements matching a selector.
    pub fn count(&self, selector: &Selector) -> usize {
        self.doc.select(selector).count()
    }

    /// Attribute value of the first matching element, if any.
    pub fn first_attr(&self, selector: &Selector, attr: &str) -> Option<&str> {
        self.doc
            .select(selector)
            .next()
            .and_then(|element| element.value().attr(attr))
    }

    /// Concatenated text content of every matching element.
    pub fn text_of(&self, selector: &Selector) -> String {
        self.doc
            .select(selector)
            .flat_map(|element| element.text())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static TITLE: Lazy<Selector> =
        Lazy::new(|| Selector::parse("title").expect("title selector must parse"));
    static DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
        Selector::parse("meta[name='description']").expect("description selector must parse")
    });

    #[test]
    fn exposes_text_and_attributes() {
        let page = Page::parse(
            "<html><head><title>Hello</title>\
             <meta name=\"description\" content=\"a page\"></head></html>",
        );
        assert_eq!(page.text_of(&TITLE), "Hello");
        assert_eq!(page.first_attr(&DESCRIPTION, "content"), Some("a page"));
        assert_eq!(page.count(&TITLE), 1);
    }

    #[test]
    fn missing_elements_yield_empty_results() {
        let page = Page::parse("<html><body></body></html>");
        assert_eq!(page.text_of(&TITLE), "");
        assert_eq!(page.first_attr(&DESCRIPTION, "content"), None);
    }
}
