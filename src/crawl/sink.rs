// src/crawl/sink.rs
// =============================================================================
// This module is the single consumer of the discovered-link channel.
//
// Every crawl worker sends DiscoveredLink events into one shared channel;
// this sink drains it, applies the optional run-wide dedup, renders each
// surviving event (plain text or JSON), and writes one line per event to
// the result stream. Diagnostics never pass through here - stdout carries
// results ONLY.
//
// The sink keeps running until the channel closes, which happens exactly
// when every worker has finished and every buffered event was received,
// so no discovered link can be lost at shutdown.
// =============================================================================

use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;

use crate::config::{CrawlConfig, OutputFormat};
use crate::extract::SourceKind;

// A link found in a fetched page, tagged with how and where it was found
//
// Immutable once created; produced by a crawl worker, consumed exactly once
// here, then discarded.
#[derive(Debug, Clone)]
pub struct DiscoveredLink {
    /// The absolute, resolved URL of the link
    pub url: String,
    /// Which kind of markup the link came from
    pub source: SourceKind,
    /// The page the link was found on
    pub origin: String,
}

// Wire shape of one JSON output line
//
// Field order here is the field order in the output.
#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(rename = "Source")]
    source: SourceKind,
    #[serde(rename = "URL")]
    url: &'a str,
    #[serde(rename = "Where")]
    origin: &'a str,
}

// Renders one discovered link according to the output flags
//
// Plain mode:  [kind] [origin] url   (each prefix only when enabled)
// JSON mode:   {"Source":"href","URL":"...","Where":"..."}
//              ("Where" is empty unless show_origin_url is set)
pub fn format_link(link: &DiscoveredLink, config: &CrawlConfig) -> String {
    match config.output_format {
        OutputFormat::Json => {
            let line = JsonLine {
                source: link.source,
                url: &link.url,
                origin: if config.show_origin_url {
                    &link.origin
                } else {
                    ""
                },
            };
            // Every field is a plain string, so encoding cannot fail
            serde_json::to_string(&line).expect("link serializes to JSON")
        }
        OutputFormat::Plain => {
            let mut parts = Vec::new();
            if config.show_source_kind {
                parts.push(format!("[{}]", link.source.label()));
            }
            if config.show_origin_url {
                parts.push(format!("[{}]", link.origin));
            }
            parts.push(link.url.clone());
            parts.join(" ")
        }
    }
}

// Drains the shared result channel until it closes
//
// Returns whether at least one link was written - the orchestrator uses
// this for its end-of-run diagnostic.
//
// With dedupe enabled, the `seen` set spans the WHOLE run: two seeds
// discovering the same URL produce one output line. This is independent of
// the per-seed visited sets, which only guard fetching.
pub async fn run_sink<W: Write>(
    mut results: Receiver<DiscoveredLink>,
    config: Arc<CrawlConfig>,
    mut out: W,
) -> bool {
    let mut seen: HashSet<String> = HashSet::new();
    let mut any_found = false;

    // recv() yields None only after every sender is dropped AND the buffer
    // is empty, so this loop is also the drain-before-shutdown step
    while let Some(link) = results.recv().await {
        if config.dedupe_globally && !seen.insert(link.url.clone()) {
            continue;
        }

        // A failed write (e.g. closed pipe) is not worth crashing the crawl
        let _ = writeln!(out, "{}", format_link(&link, &config));
        any_found = true;
    }

    any_found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn link(url: &str, source: SourceKind, origin: &str) -> DiscoveredLink {
        DiscoveredLink {
            url: url.to_string(),
            source,
            origin: origin.to_string(),
        }
    }

    #[test]
    fn test_plain_format_is_just_the_url() {
        let config = CrawlConfig::default();
        let l = link("http://example.com/x", SourceKind::Href, "http://example.com/");
        assert_eq!(format_link(&l, &config), "http://example.com/x");
    }

    #[test]
    fn test_plain_format_with_source_and_origin() {
        let config = CrawlConfig {
            show_source_kind: true,
            show_origin_url: true,
            ..CrawlConfig::default()
        };
        let l = link("http://example.com/x", SourceKind::Script, "http://example.com/");
        assert_eq!(
            format_link(&l, &config),
            "[script] [http://example.com/] http://example.com/x"
        );
    }

    #[test]
    fn test_json_format_hides_origin_by_default() {
        let config = CrawlConfig {
            output_format: OutputFormat::Json,
            ..CrawlConfig::default()
        };
        let l = link("http://example.com/x", SourceKind::Href, "http://example.com/");
        assert_eq!(
            format_link(&l, &config),
            r#"{"Source":"href","URL":"http://example.com/x","Where":""}"#
        );
    }

    #[test]
    fn test_json_format_with_origin() {
        let config = CrawlConfig {
            output_format: OutputFormat::Json,
            show_origin_url: true,
            ..CrawlConfig::default()
        };
        let l = link("http://example.com/x", SourceKind::Form, "http://example.com/");
        assert_eq!(
            format_link(&l, &config),
            r#"{"Source":"form","URL":"http://example.com/x","Where":"http://example.com/"}"#
        );
    }

    #[tokio::test]
    async fn test_sink_dedupes_across_the_run_when_unique() {
        let (tx, rx) = mpsc::channel(16);
        let config = Arc::new(CrawlConfig {
            dedupe_globally: true,
            ..CrawlConfig::default()
        });

        // Two different "workers" finding the same URL
        tx.send(link("http://a.com/x", SourceKind::Href, "http://a.com/"))
            .await
            .unwrap();
        tx.send(link("http://a.com/x", SourceKind::Href, "http://a.com/y"))
            .await
            .unwrap();
        tx.send(link("http://a.com/z", SourceKind::Href, "http://a.com/"))
            .await
            .unwrap();
        drop(tx);

        let mut out = Vec::new();
        let any_found = run_sink(rx, config, &mut out).await;

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(any_found);
        assert_eq!(lines, vec!["http://a.com/x", "http://a.com/z"]);
    }

    #[tokio::test]
    async fn test_sink_keeps_duplicates_without_unique() {
        let (tx, rx) = mpsc::channel(16);
        let config = Arc::new(CrawlConfig::default());

        tx.send(link("http://a.com/x", SourceKind::Href, "http://a.com/"))
            .await
            .unwrap();
        tx.send(link("http://a.com/x", SourceKind::Href, "http://a.com/"))
            .await
            .unwrap();
        drop(tx);

        let mut out = Vec::new();
        run_sink(rx, config, &mut out).await;

        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[tokio::test]
    async fn test_sink_reports_nothing_found_on_empty_channel() {
        let (tx, rx) = mpsc::channel::<DiscoveredLink>(16);
        drop(tx);

        let mut out = Vec::new();
        let any_found = run_sink(rx, Arc::new(CrawlConfig::default()), &mut out).await;

        assert!(!any_found);
        assert!(out.is_empty());
    }
}
