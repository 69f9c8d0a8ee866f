// src/config.rs
// =============================================================================
// This file defines the configuration for a whole crawl run.
//
// Design:
// - The configuration is built ONCE (from CLI flags, or directly by a
//   program embedding the engine) and then shared immutably with every
//   worker. Nothing in the engine reads ambient or global state during a
//   crawl - everything it needs to know arrives through this struct.
// - Defaults mirror the CLI defaults, so `CrawlConfig::default()` behaves
//   exactly like running the binary with no flags.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - The Default trait: One canonical "no flags" configuration
// =============================================================================

use std::collections::HashMap;

// How discovered links are rendered on the result stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One URL per line, optionally prefixed with bracketed tags
    Plain,
    /// One JSON object per line: {"Source": ..., "URL": ..., "Where": ...}
    Json,
}

// Configuration for one crawl run
//
// Every field has a literal, observable effect - see the CLI help text in
// src/cli.rs for the flag each one maps to.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum link-hops followed from each seed URL
    pub max_depth: usize,
    /// Size of the global fetch permit pool (max simultaneous in-flight fetches)
    pub max_concurrent_fetches: usize,
    /// Skip pages whose declared Content-Length exceeds this many KB (-1 = no limit)
    pub max_body_size_kb: i64,
    /// Deadline for each seed's whole traversal, in seconds (<= 0 = unlimited)
    pub per_seed_timeout_secs: i64,
    /// Whether the HTTP client follows redirects
    pub follow_redirects: bool,
    /// Widen the scope from exact-host to any subdomain of the seed host
    pub crawl_subdomains: bool,
    /// Additionally restrict the scope to the seed URL's path prefix
    pub restrict_to_path_prefix: bool,
    /// Extra request headers sent with every fetch
    pub extra_headers: HashMap<String, String>,
    /// Proxy URL handed to the HTTP client
    pub proxy_url: Option<String>,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
    /// Report each distinct URL only once across the whole run (all seeds)
    pub dedupe_globally: bool,
    /// Output rendering for discovered links
    pub output_format: OutputFormat,
    /// In plain output, prefix each line with the bracketed source kind
    pub show_source_kind: bool,
    /// Show the page each link was found on
    pub show_origin_url: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            max_depth: 2,
            max_concurrent_fetches: 8,
            max_body_size_kb: -1,
            per_seed_timeout_secs: -1,
            follow_redirects: true,
            crawl_subdomains: false,
            restrict_to_path_prefix: false,
            extra_headers: HashMap::new(),
            proxy_url: None,
            accept_invalid_certs: false,
            dedupe_globally: false,
            output_format: OutputFormat::Plain,
            show_source_kind: false,
            show_origin_url: false,
        }
    }
}
