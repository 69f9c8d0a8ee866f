// src/lib.rs
// =============================================================================
// Library surface of link-scout.
//
// The crawl engine is built once and called from two places:
// - src/main.rs, the CLI adapter (flags -> CrawlConfig, stdin -> seeds)
// - embedding programs, which build a CrawlConfig themselves and call
//   run_crawl directly
//
// Keeping main.rs thin means there is exactly ONE engine to test and
// reason about, instead of a library copy and a CLI copy drifting apart.
// =============================================================================

// Module declarations - tells Rust about our source files
pub mod cli;        // src/cli.rs - command-line parsing
pub mod config;     // src/config.rs - the immutable run configuration
pub mod crawl;      // src/crawl/ - the crawl engine (workers, sink, engine)
pub mod extract;    // src/extract/ - HTML link extraction
pub mod fetch;      // src/fetch/ - HTTP client construction and fetching

// Re-export the types an embedding program needs, so `use link_scout::*`
// style imports stay short
pub use config::{CrawlConfig, OutputFormat};
pub use crawl::{run_crawl, DiscoveredLink, ScopePolicy};
pub use extract::SourceKind;
