// src/fetch/client.rs
// =============================================================================
// This module performs the actual HTTP fetching.
//
// Key functionality:
// - Builds ONE reqwest client per run, carrying every transport setting
//   from the configuration: default headers, redirect policy, proxy,
//   request timeout, and certificate handling
// - fetch_page does a single GET and applies the declared-size policy
//   BEFORE downloading the body
//
// Status codes are deliberately not checked here: a 404 page can still
// contain links worth extracting, so only transport and decode failures
// count as errors.
// =============================================================================

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy};
use std::time::Duration;

use crate::config::CrawlConfig;

// What a single fetch produced
#[derive(Debug)]
pub enum FetchOutcome {
    /// The decoded response body, ready for link extraction
    Body(String),
    /// The declared Content-Length exceeded the configured cap; the body
    /// was never downloaded. A policy skip, not an error.
    TooLarge,
}

// Builds the HTTP client shared by every worker in a run
//
// We build it once and clone it per worker: reqwest clients are cheap to
// clone (internally reference-counted) and share a connection pool.
//
// Errors here (a bad proxy URL, TLS setup failure) are configuration
// problems and abort the run before any worker starts.
pub fn build_client(config: &CrawlConfig) -> Result<Client> {
    // Headers that fail validation are dropped, matching the "silently
    // ignore malformed header entries" rule in the CLI layer
    let mut headers = HeaderMap::new();
    for (name, value) in &config.extra_headers {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            continue;
        };
        let Ok(value) = HeaderValue::from_str(value) else {
            continue;
        };
        headers.insert(name, value);
    }

    let mut builder = Client::builder()
        .default_headers(headers)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .redirect(if config.follow_redirects {
            // Follow up to 5 redirects - enough for real sites, bounded
            // against redirect loops
            reqwest::redirect::Policy::limited(5)
        } else {
            reqwest::redirect::Policy::none()
        });

    // The per-seed deadline also bounds each individual request, so a
    // single stuck connection cannot eat the seed's whole time allowance
    if config.per_seed_timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.per_seed_timeout_secs as u64));
    }

    if let Some(proxy_url) = &config.proxy_url {
        builder = builder.proxy(Proxy::all(proxy_url)?);
    }

    Ok(builder.build()?)
}

// Fetches one page and returns its body, or a policy skip
//
// Parameters:
//   client: the shared run client
//   url: the absolute URL to fetch
//   max_body_size_kb: declared-size cap in KB, -1 (or any non-positive
//                     value) meaning no cap
//
// The size check reads the response's declared Content-Length after the
// headers arrive but before the body is pulled, so oversized pages cost a
// request, not a download.
pub async fn fetch_page(client: &Client, url: &str, max_body_size_kb: i64) -> Result<FetchOutcome> {
    let response = client.get(url).send().await?;

    if max_body_size_kb > 0 {
        if let Some(declared) = response.content_length() {
            if declared > max_body_size_kb as u64 * 1024 {
                return Ok(FetchOutcome::TooLarge);
            }
        }
    }

    // .text() decodes using the response charset; a decode failure is a
    // fetch error like any other
    let body = response.text().await?;
    Ok(FetchOutcome::Body(body))
}
