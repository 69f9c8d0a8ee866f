// src/extract/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Links come from three places, always walked in the same order:
// - <a href="...">      -> hyperlink references
// - <script src="...">  -> script sources
// - <form action="..."> -> form submission targets
//
// The raw attribute values are returned untouched (possibly relative,
// possibly garbage); the caller resolves them against the page URL.
// =============================================================================

use scraper::{Html, Selector};
use serde::Serialize;

// Where in the page a link was found
//
// Serialized lowercase so JSON output reads {"Source": "href", ...}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// An <a href> hyperlink
    Href,
    /// A <script src> reference
    Script,
    /// A <form action> target
    Form,
}

impl SourceKind {
    /// The lowercase tag used in plain-text output, e.g. "[href]"
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Href => "href",
            SourceKind::Script => "script",
            SourceKind::Form => "form",
        }
    }
}

// Extracts all raw links from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: Vec of (source kind, raw attribute value) pairs, in source-kind
// order (all hrefs, then all script sources, then all form actions), each
// group in document order.
//
// Example:
//   html = "<a href='/docs'>Docs</a><script src='app.js'></script>"
//   result = [(Href, "/docs"), (Script, "app.js")]
pub fn extract_links(html: &str) -> Vec<(SourceKind, String)> {
    let mut links = Vec::new();

    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // One selector per source kind; the order of this table is the order
    // links are yielded in
    let sources = [
        (SourceKind::Href, "a[href]", "href"),
        (SourceKind::Script, "script[src]", "src"),
        (SourceKind::Form, "form[action]", "action"),
    ];

    for (kind, selector, attr) in sources {
        // These selectors are constants and known to be valid, so .unwrap()
        // can only panic on a programmer error
        let selector = Selector::parse(selector).unwrap();

        for element in document.select(&selector) {
            if let Some(value) = element.value().attr(attr) {
                links.push((kind, value.to_string()));
            }
        }
    }

    links
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like querySelector)
//    - "a[href]" means "all <a> tags that have an href attribute"
//
// 2. Why return the raw attribute value?
//    - "/docs", "../x", "https://a/b" and "javascript:void(0)" all come out
//      as written in the page
//    - Resolution needs the page URL, and scope needs the seed policy -
//      neither belongs in a parser
//
// 3. Why a tuple instead of a struct here?
//    - The pair is consumed immediately by the crawl worker, which builds
//      the real DiscoveredLink event after resolution and scope checks
// -----------------------------------------------------------------------------
