use once_cell::sync::Lazy;

use super::matcher::PatternSet;
use super::{round2, SniffResult, Sniffer};
use crate::page::Page;

// Per-technology markup fingerprints. Matched case-insensitively against the
// serialized HTML, scripts included.
static NEXTJS: Lazy<PatternSet> =
    Lazy::new(|| PatternSet::new(&["__next", "_next/", "next\\.js", "__NEXT_DATA__"]));
static TAILWIND: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&[
        "tailwindcss",
        "class=\".*?\\b(flex|grid|p-\\d|m-\\d|bg-|text-|rounded|shadow)\\b",
        "--tw-",
        "tailwind",
    ])
});
static SUPABASE: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&["supabase", "\\.supabase\\.co", "supabase-client", "sb-"])
});
static VERCEL: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&["vercel\\.app", "_vercel", "vercel-insights", "va/script\\.js"])
});
static SHADCN: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&["shadcn", "class=\".*?\\b(cn\\()", "radix-ui", "@radix-ui"])
});
static REACT: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&["react", "__react", "data-reactroot", "data-reactid"])
});
static VITE: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&[
        "/assets/index-[a-zA-Z0-9]+\\.js",
        "type=\"module\".*?crossorigin",
        "vite",
    ])
});

/// Detects the tech stack combinations AI code generators reach for by
/// default.
pub struct TechStackSniffer;

impl Sniffer for TechStackSniffer {
    fn name(&self) -> &'static str {
        "TechStack"
    }

    fn sniff(&self, page: &Page, url: Option<&str>) -> SniffResult {
        let html = page.html();
        let mut score: f64 = 0.0;
        let mut messages: Vec<String> = Vec::new();
        let mut detected: Vec<&'static str> = Vec::new();

        if NEXTJS.is_match(html) {
            detected.push("Next.js");
        }
        if TAILWIND.is_match(html) {
            detected.push("Tailwind CSS");
        }
        if SUPABASE.is_match(html) {
            detected.push("Supabase");
        }
        if VERCEL.is_match(html) || url.is_some_and(|url| url.contains("vercel.app")) {
            detected.push("Vercel");
        }
        if SHADCN.is_match(html) {
            detected.push("shadcn/ui");
        }
        if REACT.is_match(html) {
            detected.push("React");
        }
        if VITE.is_match(html) {
            detected.push("Vite");
        }

        let has_nextjs = detected.contains(&"Next.js");
        let has_tailwind = detected.contains(&"Tailwind CSS");
        let has_supabase = detected.contains(&"Supabase");
        let has_vercel = detected.contains(&"Vercel");
        let has_shadcn = detected.contains(&"shadcn/ui");
        let has_vite = detected.contains(&"Vite");
        let has_react = detected.contains(&"React");

        if has_nextjs && has_tailwind && has_supabase {
            score += 0.9;
            messages.push("Classic AI stack: Next.js + Tailwind + Supabase".into());
        } else if has_nextjs && has_tailwind && has_vercel {
            score += 0.8;
            messages.push("AI-favorite stack: Next.js + Tailwind + Vercel".into());
        } else if has_nextjs && has_tailwind {
            score += 0.6;
            messages.push("Common AI stack: Next.js + Tailwind CSS".into());
        }

        if has_shadcn && (has_nextjs || has_tailwind) {
            score += 0.4;
            messages.push("shadcn/ui detected (very popular in AI projects)".into());
        }

        if has_vite && has_react && has_tailwind {
            score += 0.6;
            messages.push("Vite + React + Tailwind (common AI template)".into());
        } else if has_vite && has_tailwind {
            score += 0.4;
            messages.push("Vite + Tailwind (popular AI quick-start)".into());
        }

        if has_tailwind && score == 0.0 {
            score += 0.2;
            messages.push("Tailwind CSS detected (very popular in AI projects)".into());
        }

        if detected.len() >= 5 {
            score += 0.2;
            messages.push(format!(
                "Uses {} modern frameworks (AI tendency to over-engineer)",
                detected.len()
            ));
        } else if detected.len() >= 3 {
            score += 0.1;
        }

        score = score.min(1.0);

        if !detected.is_empty() {
            messages.push(format!("Detected: {}", detected.join(", ")));
        }

        if messages.is_empty() {
            return self.result(0.0, "No common AI tech stack patterns detected");
        }

        self.result(round2(score), messages.join("; "))
    }
}
