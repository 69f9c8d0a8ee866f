// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There are no subcommands here: the tool does one thing. Seed URLs arrive
// line-delimited on stdin, flags tune the crawl, and the flags map 1:1 onto
// a CrawlConfig (see into_config below).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Doc comments (///): clap turns these into --help text
// =============================================================================

use clap::Parser;
use std::collections::HashMap;

use crate::config::{CrawlConfig, OutputFormat};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "link-scout",
    version = "0.1.0",
    about = "Discover reachable URLs by crawling out from seed addresses",
    long_about = "link-scout reads seed URLs from stdin (one per line), crawls each one \
                  breadth-first up to a bounded depth, and streams every in-scope link it \
                  finds to stdout as it is discovered. Diagnostics go to stderr, so the \
                  result stream stays pipeable."
)]
pub struct Cli {
    /// Maximum crawl depth (link-hops from each seed)
    #[arg(short = 'd', long, default_value_t = 2)]
    pub depth: usize,

    /// Maximum number of simultaneous in-flight fetches, across all seeds
    #[arg(short = 't', long, default_value_t = 8)]
    pub threads: usize,

    /// Skip pages whose declared Content-Length exceeds this many KB (-1 = no limit)
    #[arg(long = "max-size", default_value_t = -1, allow_negative_numbers = true)]
    pub max_size: i64,

    /// Also crawl subdomains of each seed's hostname
    #[arg(long)]
    pub subs: bool,

    /// Only crawl URLs under each seed's path prefix
    #[arg(short = 'i', long)]
    pub inside: bool,

    /// Custom request headers, ';;'-separated (e.g. "Cookie: a=b;;X-Test:1")
    #[arg(short = 'H', long, default_value = "")]
    pub headers: String,

    /// Report each distinct URL only once across the whole run
    #[arg(short = 'u', long)]
    pub unique: bool,

    /// Proxy URL for all requests (e.g. http://127.0.0.1:8080)
    #[arg(long)]
    pub proxy: Option<String>,

    /// Per-seed deadline in seconds (-1 = unlimited)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub timeout: i64,

    /// Do not follow HTTP redirects
    #[arg(long = "disable-redirects")]
    pub disable_redirects: bool,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Emit one JSON object per discovered link instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// In plain output, prefix each link with its bracketed source kind
    #[arg(short = 's', long = "show-source")]
    pub show_source: bool,

    /// Show the page each link was found on
    #[arg(short = 'w', long = "show-where")]
    pub show_where: bool,
}

impl Cli {
    // Converts the parsed flags into the engine's immutable configuration
    //
    // This is the only place flag names and config fields meet; the engine
    // itself never sees clap.
    pub fn into_config(self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.depth,
            max_concurrent_fetches: self.threads.max(1),
            max_body_size_kb: self.max_size,
            per_seed_timeout_secs: self.timeout,
            follow_redirects: !self.disable_redirects,
            crawl_subdomains: self.subs,
            restrict_to_path_prefix: self.inside,
            extra_headers: parse_headers(&self.headers),
            proxy_url: self.proxy,
            accept_invalid_certs: self.insecure,
            dedupe_globally: self.unique,
            output_format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Plain
            },
            show_source_kind: self.show_source,
            show_origin_url: self.show_where,
        }
    }
}

// Parses a ';;'-separated header list into key/value pairs
//
// Each entry is "Key: Value" or "Key:Value" (the spaced form wins when both
// would match). Entries without a separator are silently ignored.
//
// Example:
//   "Cookie: a=b;;X-Test:1" -> {"Cookie": "a=b", "X-Test": "1"}
pub fn parse_headers(raw: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for entry in raw.split(";;") {
        // Try the "Key: Value" form first so values containing ':' survive
        let (key, value) = if let Some(pair) = entry.split_once(": ") {
            pair
        } else if let Some(pair) = entry.split_once(':') {
            pair
        } else {
            // No separator at all - not an error, just not a header
            continue;
        };

        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    headers
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why no subcommands?
//    - clap supports a Subcommand enum for multi-purpose tools, but this
//      tool has exactly one job, so the flags live directly on Cli
//
// 2. What does default_value_t do?
//    - Sets the default using a value of the field's own type (here plain
//      integers), instead of parsing a string default
//
// 3. Why into_config instead of using Cli everywhere?
//    - The engine should not depend on clap or on flag spelling
//    - CrawlConfig is the stable interface; Cli is just one way to build it
//
// 4. What is split_once?
//    - Splits a string at the FIRST occurrence of a separator
//    - Returns Option<(&str, &str)>, so "a:b:c" becomes ("a", "b:c")
//    - Exactly what header parsing wants: values may contain ':'
// -----------------------------------------------------------------------------
