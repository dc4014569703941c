use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::page::Page;

/// Desktop browser user agent sent with every request; some hosts serve
/// stripped-down or blocked pages to obvious bots.
pub const SPOOFED_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

static STYLESHEET_LINK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("link[rel='stylesheet'][href]").expect("stylesheet selector must parse")
});
static HEAD_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?i)</head>").expect("head-close pattern must parse"));

/// Errors raised while fetching the page under analysis.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("fetching {url} returned status {status}")]
    Status { url: String, status: StatusCode },
}

/// Build the HTTP client used for page and stylesheet fetches.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder().user_agent(SPOOFED_USER_AGENT).build()
}

/// GET a URL and return the response body as text.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.text().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })
}

/// Fetch a page and hand back the parsed snapshot with external stylesheets
/// inlined, so style-based sniffers see linked CSS as if it were on-page.
///
/// Each stylesheet fetch is independent and best-effort: failures are logged
/// and swallowed, never aborting the analysis. Only the primary page fetch
/// can fail.
#[instrument(skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<Page, FetchError> {
    let mut html = fetch_html(client, url).await?;

    let mut inlined: Vec<(String, String)> = Vec::new();
    for href in stylesheet_hrefs(&html) {
        let Some(absolute) = resolve_href(url, &href) else {
            debug!(stylesheet = %href, "skipping unresolvable stylesheet href");
            continue;
        };
        match fetch_html(client, &absolute).await {
            Ok(css) => inlined.push((absolute, css)),
            Err(err) => {
                debug!(stylesheet = %absolute, error = %err, "ignoring failed stylesheet fetch")
            }
        }
    }

    if !inlined.is_empty() {
        debug!(count = inlined.len(), "inlined external stylesheets");
        html = inject_styles(&html, &inlined);
    }
    Ok(Page::parse(&html))
}

fn stylesheet_hrefs(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&STYLESHEET_LINK)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

fn resolve_href(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    Some(base.join(href).ok()?.into())
}

fn inject_styles(html: &str, styles: &[(String, String)]) -> String {
    let mut block = String::new();
    for (href, css) in styles {
        block.push_str(&format!("<style data-external-css=\"{href}\">{css}</style>"));
    }
    match HEAD_CLOSE.find(html) {
        Some(found) => {
            let mut out = String::with_capacity(html.len() + block.len());
            out.push_str(&html[..found.start()]);
            out.push_str(&block);
            out.push_str(&html[found.start()..]);
            out
        }
        None => format!("{html}{block}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_stylesheet_hrefs() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="/main.css">
            <link rel="stylesheet" href="https://cdn.example/site.css">
            <link rel="icon" href="/favicon.ico">
        </head></html>"#;
        assert_eq!(
            stylesheet_hrefs(html),
            vec!["/main.css".to_string(), "https://cdn.example/site.css".to_string()]
        );
    }

    #[test]
    fn resolves_relative_and_absolute_hrefs() {
        assert_eq!(
            resolve_href("https://example.com/page", "/main.css").as_deref(),
            Some("https://example.com/main.css")
        );
        assert_eq!(
            resolve_href("https://example.com/a/b", "site.css").as_deref(),
            Some("https://example.com/a/site.css")
        );
        assert_eq!(
            resolve_href("https://example.com", "https://cdn.example/x.css").as_deref(),
            Some("https://cdn.example/x.css")
        );
    }

    #[test]
    fn injects_styles_before_head_close() {
        let html = "<html><head><title>t</title></HEAD><body></body></html>";
        let out = inject_styles(html, &[("https://c/x.css".into(), ".a{color:red}".into())]);
        assert!(out.contains("data-external-css=\"https://c/x.css\""));
        let style_pos = out.find("<style").unwrap();
        let head_pos = out.find("</HEAD>").unwrap();
        assert!(style_pos < head_pos);
    }

    #[test]
    fn appends_styles_when_no_head_present() {
        let out = inject_styles("<p>bare</p>", &[("u".into(), ".b{}".into())]);
        assert!(out.ends_with("</style>"));
        assert!(out.starts_with("<p>bare</p>"));
    }
}
