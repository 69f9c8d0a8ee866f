// src/extract/mod.rs
// =============================================================================
// This module extracts raw links from fetched HTML bodies.
//
// Submodules:
// - html: Pulls (source kind, raw link) pairs out of a page with scraper
//
// The extractor deliberately does NOT resolve or filter the links it finds;
// resolving against the page URL and deciding scope are the crawl worker's
// job. Keeping this module dumb keeps it trivially testable.
// =============================================================================

mod html;

// Re-export the public extraction API
pub use html::{extract_links, SourceKind};
