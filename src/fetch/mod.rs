// src/fetch/mod.rs
// =============================================================================
// This module owns all HTTP transport concerns.
//
// Submodules:
// - client: Builds the shared reqwest client from a CrawlConfig and
//   performs single GET requests with the declared-size policy check
//
// The rest of the engine never touches reqwest directly; it sees a built
// Client, fetch_page, and the FetchOutcome enum, nothing else.
// =============================================================================

mod client;

// Re-export the public fetch API
pub use client::{build_client, fetch_page, FetchOutcome};
