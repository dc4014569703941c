use once_cell::sync::Lazy;
use scraper::Selector;
use url::Url;

use super::{SniffResult, Sniffer};
use crate::page::Page;

/// Default domains handed out by AI builders, deployment platforms, and
/// no-code site builders. A page still served from one of these almost never
/// sits behind a hand-built deployment.
const AI_SERVICE_DOMAINS: &[&str] = &[
    "lovable.app",
    "lovable.dev",
    "gptengineer.app",
    "base44.app",
    "base44.dev",
    "v0.dev",
    "vercel.app",
    "bolt.new",
    "stackblitz.io",
    "replit.app",
    "replit.dev",
    "repl.co",
    "netlify.app",
    "github.io",
    "pages.dev",
    "onrender.com",
    "railway.app",
    "up.railway.app",
    "fly.dev",
    "surge.sh",
    "glitch.me",
    "codesandbox.io",
    "csb.app",
    "herokuapp.com",
    "webflow.io",
    "framer.website",
    "framer.app",
    "wixsite.com",
    "wix.com",
    "squarespace.com",
    "webnode.com",
    "weebly.com",
    "site123.me",
    "carrd.co",
    "bubbleapps.io",
    "softr.app",
    "tilda.ws",
    "000webhostapp.com",
    "web.app",
    "firebaseapp.com",
];

/// Domains that only AI builders hand out.
const HIGH_CONFIDENCE_AI_DOMAINS: &[&str] = &[
    "lovable.app",
    "lovable.dev",
    "gptengineer.app",
    "base44.app",
    "base44.dev",
    "v0.dev",
    "bolt.new",
];

/// Deployment platforms heavily used for AI projects, but not exclusively.
const MEDIUM_CONFIDENCE_DOMAINS: &[&str] = &[
    "vercel.app",
    "netlify.app",
    "replit.app",
    "replit.dev",
    "repl.co",
    "pages.dev",
    "github.io",
];

static CANONICAL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("link[rel='canonical']").expect("canonical selector must parse"));
static OG_URL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[property='og:url']").expect("og:url selector must parse")
});

/// Detects pages hosted on an AI service's default domain.
pub struct DomainSniffer;

impl Sniffer for DomainSniffer {
    fn name(&self) -> &'static str {
        "Domain"
    }

    fn sniff(&self, page: &Page, url: Option<&str>) -> SniffResult {
        let url = url
            .map(str::to_string)
            .or_else(|| page.first_attr(&CANONICAL, "href").map(str::to_string))
            .or_else(|| page.first_attr(&OG_URL, "content").map(str::to_string))
            .unwrap_or_default();

        if url.is_empty() {
            return self.result(0.0, "Cannot determine domain");
        }

        let hostname = match Url::parse(&url).ok().and_then(|parsed| {
            parsed.host_str().map(|host| host.to_ascii_lowercase())
        }) {
            Some(hostname) => hostname,
            None => return self.result(0.0, "Invalid URL in meta tags"),
        };

        for domain in HIGH_CONFIDENCE_AI_DOMAINS {
            if hostname.ends_with(domain) {
                return self.result(
                    1.0,
                    format!(
                        "DEFINITIVE: Hosted on AI builder domain: {domain} \
                         (almost certainly AI-generated)"
                    ),
                );
            }
        }

        for domain in MEDIUM_CONFIDENCE_DOMAINS {
            if hostname.ends_with(domain) {
                return self.result(
                    0.7,
                    format!("Hosted on popular AI deployment platform: {domain}"),
                );
            }
        }

        for domain in AI_SERVICE_DOMAINS {
            if hostname.ends_with(domain) {
                return self.result(0.8, format!("Hosted on AI/no-code platform: {domain}"));
            }
        }

        self.result(0.0, format!("Custom domain: {hostname}"))
    }
}
