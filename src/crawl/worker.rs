// src/crawl/worker.rs
// =============================================================================
// This module implements one seed's crawl: a bounded breadth-first
// traversal over the links reachable from the seed URL.
//
// How it works:
// 1. Start with (seed, depth 0) in a frontier queue
// 2. Pop the next task; drop it if it is too deep or already visited
// 3. Take a permit from the global pool, fetch the page, give it back
// 4. Extract raw links, resolve each against the page URL
// 5. Emit every in-scope link into the result channel, and - while still
//    below the depth limit - push it onto the frontier
// 6. Repeat until the frontier drains
//
// Ownership:
// - The frontier and visited set belong to THIS worker alone. Two seeds
//   may legitimately crawl the same URL; only the sink's optional global
//   dedup spans seeds. Single ownership means no locks anywhere here.
//
// Rust concepts:
// - VecDeque: Double-ended queue, push_back/pop_front gives us BFS order
// - HashSet: O(1) membership test for visited URLs
// - Owned semaphore permits: Released on drop, even through cancellation
// =============================================================================

use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::Semaphore;
use url::Url;

use crate::config::CrawlConfig;
use crate::crawl::scope::ScopePolicy;
use crate::crawl::sink::DiscoveredLink;
use crate::extract;
use crate::fetch::{self, FetchOutcome};

// A unit of pending work in one seed's frontier
#[derive(Debug, Clone)]
struct CrawlTask {
    url: String,
    depth: usize, // link-hops from the seed URL
}

// Crawls everything reachable from one seed URL
//
// Parameters:
//   seed_url: where this worker starts
//   client: the run-wide HTTP client (cheap clone, shared pool)
//   permits: the global fetch permit pool shared by ALL workers
//   results: sending half of the shared result channel
//   config: the immutable run configuration
//
// Errors never escape this function: per-URL fetch failures are reported
// to stderr and skipped, and a seed without a hostname simply produces no
// work. The caller owns cancellation (the per-seed timeout wraps this
// whole future).
pub(crate) async fn crawl_seed(
    seed_url: String,
    client: Client,
    permits: Arc<Semaphore>,
    results: Sender<DiscoveredLink>,
    config: Arc<CrawlConfig>,
) {
    // A seed that doesn't parse, or parses without a hostname, cannot
    // anchor a scope - it contributes zero tasks
    let Ok(seed) = Url::parse(&seed_url) else {
        return;
    };
    let Some(policy) =
        ScopePolicy::new(&seed, config.crawl_subdomains, config.restrict_to_path_prefix)
    else {
        return;
    };

    let mut frontier: VecDeque<CrawlTask> = VecDeque::new();
    frontier.push_back(CrawlTask {
        url: seed.to_string(),
        depth: 0,
    });

    // URLs already dequeued for processing; never shrinks
    let mut visited: HashSet<String> = HashSet::new();

    while let Some(task) = frontier.pop_front() {
        // Stale entries are dropped HERE, at dequeue time. Links are pushed
        // onto the frontier without consulting the visited set (see the
        // emit step below), so duplicate and over-depth tasks are expected
        // and harmless - dropping one is a no-op, not an error.
        if task.depth > config.max_depth || visited.contains(&task.url) {
            continue;
        }
        visited.insert(task.url.clone());

        // The permit pool is the global backpressure point: at most
        // `threads` fetches are in flight across all seeds. The owned
        // permit is returned on drop, so a timeout that cancels us
        // mid-fetch can never leak one.
        let permit = permits
            .clone()
            .acquire_owned()
            .await
            .expect("permit pool is never closed");
        let outcome = fetch::fetch_page(&client, &task.url, config.max_body_size_kb).await;
        drop(permit);

        let body = match outcome {
            Ok(FetchOutcome::Body(body)) => body,
            // Declared size over the cap: skip the page, keep crawling
            Ok(FetchOutcome::TooLarge) => continue,
            Err(e) => {
                // One failed URL never aborts the seed
                eprintln!("Warning: Failed to fetch {}: {}", task.url, e);
                continue;
            }
        };

        // Task URLs always came from Url serialization, so this re-parse
        // cannot realistically fail; if it somehow does, skip the page
        let Ok(page_url) = Url::parse(&task.url) else {
            continue;
        };

        for (kind, raw_link) in extract::extract_links(&body) {
            // Resolve relative links against the page they appeared on
            let Ok(absolute) = page_url.join(&raw_link) else {
                continue;
            };

            if !policy.in_scope(&absolute) {
                continue;
            }

            let link = DiscoveredLink {
                url: absolute.to_string(),
                source: kind,
                origin: task.url.clone(),
            };
            // May suspend while the sink catches up (bounded channel). A
            // closed channel means the run is shutting down - stop quietly.
            if results.send(link).await.is_err() {
                return;
            }

            // Below the horizon, the link becomes future work. Note the
            // deliberate asymmetry with the visited check above: enqueue is
            // unconditional, dedup happens at dequeue.
            if task.depth < config.max_depth {
                frontier.push_back(CrawlTask {
                    url: absolute.to_string(),
                    depth: task.depth + 1,
                });
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why check visited at dequeue time instead of before enqueueing?
//    - The emit loop would need the visited set at enqueue time too, and
//      the same URL can be pushed from two different pages before either
//      copy is processed - checking once, at the pop, handles both cases
//      with a single lookup
//    - A duplicate frontier entry costs a few bytes; a missed one costs a
//      whole subtree
//
// 2. What is acquire_owned?
//    - Semaphore::acquire borrows the semaphore; acquire_owned takes an
//      Arc and returns a permit that owns its place in the pool
//    - The owned permit can cross .await points freely and releases itself
//      when dropped - including when the whole task is cancelled
//
// 3. Why is the permit released before extraction?
//    - Parsing HTML is CPU work, not network work; holding a fetch permit
//      through it would starve other workers of network time
//
// 4. Why Url::join?
//    - It resolves relative links the way a browser does:
//      "https://a.com/docs/" + "../about" = "https://a.com/about"
//    - Absolute links pass through unchanged, and schemes like mailto:
//      simply fail the scope check afterwards
// -----------------------------------------------------------------------------
