// src/crawl/engine.rs
// =============================================================================
// This module owns the lifecycle of a whole crawl run.
//
// What happens here:
// 1. Clean the seed list (trim, drop blanks and # comments); bail out with
//    a hint when nothing is left
// 2. Build the one shared HTTP client and the global fetch permit pool
// 3. Start the result sink, then one crawl worker task per seed, each
//    under its own optional deadline
// 4. Wait for every worker - one seed failing or timing out never takes
//    the others down
// 5. Let the sink drain the channel completely, then report whether the
//    whole run produced anything
//
// This is also the embeddable entry point: library users call run_crawl
// directly with a CrawlConfig and their own seed list, and the CLI in
// src/main.rs is just one thin caller.
// =============================================================================

use anyhow::Result;
use futures::future::join_all;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};

use crate::config::CrawlConfig;
use crate::crawl::sink::run_sink;
use crate::crawl::worker::crawl_seed;
use crate::fetch;

// Bounded so that a slow output consumer applies backpressure to the
// workers instead of buffering discovered links without limit
const RESULT_CHANNEL_CAPACITY: usize = 1024;

// Runs a complete crawl over the given seed URLs
//
// Returns Ok(true) when at least one in-scope link was reported, Ok(false)
// when the run completed without finding anything (including the no-seeds
// case). Individual fetch failures and seed timeouts are diagnostics, not
// errors - the only Err cases are configuration problems such as an
// unusable proxy URL.
pub async fn run_crawl(config: CrawlConfig, seeds: Vec<String>) -> Result<bool> {
    // Seed lines come straight from stdin (or an embedding caller): trim
    // them, skip blanks and comment lines
    let seeds: Vec<String> = seeds
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    if seeds.is_empty() {
        eprintln!("No URLs detected. Hint: cat urls.txt | link-scout");
        return Ok(false);
    }

    // One client for the whole run: connection pooling plus the run-wide
    // header, redirect, proxy, TLS and timeout settings
    let client = fetch::build_client(&config)?;
    let config = Arc::new(config);

    let (results_tx, results_rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
    let sink = tokio::spawn(run_sink(results_rx, Arc::clone(&config), io::stdout()));

    // The global permit pool: at most `threads` fetches in flight at once,
    // no matter how many seeds are crawling
    let permits = Arc::new(Semaphore::new(config.max_concurrent_fetches));

    let mut workers = Vec::new();
    for seed in seeds {
        let worker = crawl_seed(
            seed.clone(),
            client.clone(),
            Arc::clone(&permits),
            results_tx.clone(),
            Arc::clone(&config),
        );

        let seconds = config.per_seed_timeout_secs;
        workers.push(tokio::spawn(async move {
            if seconds > 0 {
                let deadline = Duration::from_secs(seconds as u64);
                // Cancelling the worker future mid-fetch is safe: its
                // permit is owned and returns to the pool on drop
                if tokio::time::timeout(deadline, worker).await.is_err() {
                    eprintln!("Warning: Seed timed out after {}s: {}", seconds, seed);
                }
            } else {
                worker.await;
            }
        }));
    }

    // The sink stops when every sender is gone. The workers hold clones,
    // so dropping ours here means "closed when the last worker finishes".
    drop(results_tx);

    // Wait for every worker; a panicked task surfaces as a JoinError and
    // must not cancel its siblings
    for joined in join_all(workers).await {
        if let Err(e) = joined {
            eprintln!("Warning: Crawl worker failed: {}", e);
        }
    }

    // By now the channel is closed, so the sink drains whatever is still
    // buffered and returns - no discovered link is lost at shutdown
    let any_found = sink.await.unwrap_or(false);

    if !any_found {
        eprintln!("No links were found. This usually happens when redirects lead out of scope.");
    }

    Ok(any_found)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why spawn workers instead of just joining futures?
//    - tokio::spawn hands each seed to the runtime scheduler, so seeds
//      truly run in parallel on a multi-threaded runtime
//    - It also isolates panics: a crashed worker becomes a JoinError for
//      us to report, instead of unwinding through the whole run
//
// 2. Why does dropping results_tx matter so much?
//    - The sink's recv() only returns None when ALL senders are dropped
//    - If the orchestrator kept its sender alive, the sink would wait
//      forever and the run would hang after the last worker finished
//
// 3. Why is there no global deadline?
//    - Each seed gets its own timeout; since they run concurrently, the
//      run as a whole ends when the slowest (or slowest-timing-out) seed
//      does
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_no_seeds_is_a_clean_empty_run() {
        let found = run_crawl(CrawlConfig::default(), vec![]).await.unwrap();
        assert!(!found);
    }

    #[tokio::test]
    async fn test_blank_and_comment_lines_are_not_seeds() {
        let seeds = vec![
            "".to_string(),
            "   ".to_string(),
            "# commented out".to_string(),
        ];
        let found = run_crawl(CrawlConfig::default(), seeds).await.unwrap();
        assert!(!found);
    }

    #[tokio::test]
    async fn test_run_reports_found_links() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"<a href="/next">next</a>"#),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/next"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let config = CrawlConfig {
            max_depth: 1,
            ..CrawlConfig::default()
        };
        let found = run_crawl(config, vec![format!("{}/", server.uri())])
            .await
            .unwrap();
        assert!(found);
    }

    #[tokio::test]
    async fn test_unparseable_seed_is_a_zero_link_run() {
        let found = run_crawl(CrawlConfig::default(), vec!["%% nope %%".to_string()])
            .await
            .unwrap();
        assert!(!found);
    }

    #[tokio::test]
    async fn test_bad_proxy_is_a_configuration_error() {
        let config = CrawlConfig {
            proxy_url: Some("not a proxy".to_string()),
            ..CrawlConfig::default()
        };
        assert!(run_crawl(config, vec!["http://example.com/".to_string()])
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_single_permit_serializes_fetches() {
        let server = MockServer::start().await;
        let delay = Duration::from_millis(200);
        Mock::given(method("GET"))
            .and(path("/s1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("")
                    .set_delay(delay),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/s2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("")
                    .set_delay(delay),
            )
            .mount(&server)
            .await;

        let config = CrawlConfig {
            max_concurrent_fetches: 1,
            ..CrawlConfig::default()
        };
        let seeds = vec![
            format!("{}/s1", server.uri()),
            format!("{}/s2", server.uri()),
        ];

        let started = Instant::now();
        run_crawl(config, seeds).await.unwrap();

        // With one permit the two delayed fetches cannot overlap, so the
        // run must take at least the sum of both delays
        assert!(started.elapsed() >= delay * 2);
    }

    #[tokio::test]
    async fn test_seed_timeout_does_not_starve_other_seeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("")
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"<a href="/found">x</a>"#),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/found"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let config = CrawlConfig {
            max_depth: 1,
            per_seed_timeout_secs: 1,
            ..CrawlConfig::default()
        };
        let seeds = vec![
            format!("{}/slow", server.uri()),
            format!("{}/fast", server.uri()),
        ];

        let started = Instant::now();
        let found = run_crawl(config, seeds).await.unwrap();

        // The fast seed's link is reported even though the slow seed dies
        // at its deadline, and the run ends long before the 30s delay
        assert!(found);
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
