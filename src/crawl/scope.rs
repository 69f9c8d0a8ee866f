// src/crawl/scope.rs
// =============================================================================
// This module decides which discovered URLs belong to a seed's crawl.
//
// A ScopePolicy is derived once from the seed URL and the scope flags, and
// never changes for the worker's lifetime. The check itself is a pure
// function of (policy, candidate URL) - no network, no state - which is
// what makes it table-testable.
//
// Two host modes:
// - ExactHost: the candidate hostname must equal the seed hostname. Plain
//   string equality; subdomains do NOT match.
// - AnySubdomain: the candidate URL (as a string) must contain the seed
//   hostname preceded by '.' or '//' and followed by a path separator,
//   fragment, query, port colon, or the end of the string. The boundary on
//   both sides is what keeps lookalikes such as evilexample.com from
//   matching a seed of example.com.
//
// Either mode can be tightened further with a path prefix: the candidate's
// path must then start with the seed's own start path (plain string prefix,
// not segment-aware).
// =============================================================================

use regex::Regex;
use url::Url;

// Which hostnames count as in-scope for one seed
#[derive(Debug)]
enum ScopeMode {
    /// Candidate hostname must equal the seed hostname exactly
    ExactHost,
    /// Candidate URL string must match the guarded subdomain pattern
    AnySubdomain(Regex),
}

// The scope rules for one seed, fixed at worker start
#[derive(Debug)]
pub struct ScopePolicy {
    seed_hostname: String,
    mode: ScopeMode,
    path_prefix: Option<String>,
}

impl ScopePolicy {
    // Derives the policy for a seed URL
    //
    // Returns None when the seed has no hostname (e.g. mailto: or a bare
    // path) - such a seed cannot anchor a crawl at all.
    pub fn new(seed: &Url, crawl_subdomains: bool, restrict_to_path_prefix: bool) -> Option<Self> {
        let seed_hostname = seed.host_str()?.to_string();

        let mode = if crawl_subdomains {
            // "(.|//)" before the hostname and "(/|#|?|:|end)" after it -
            // both boundaries are required, so a longer hostname that merely
            // contains the seed hostname will not match
            let pattern = format!(r"(\.|//){}(/|#|\?|:|$)", regex::escape(&seed_hostname));
            // The hostname is escaped above, so the pattern is always valid
            ScopeMode::AnySubdomain(Regex::new(&pattern).expect("scope pattern is valid"))
        } else {
            ScopeMode::ExactHost
        };

        let path_prefix = if restrict_to_path_prefix {
            Some(seed.path().to_string())
        } else {
            None
        };

        Some(ScopePolicy {
            seed_hostname,
            mode,
            path_prefix,
        })
    }

    // Decides whether a discovered absolute URL may be reported and crawled
    //
    // A candidate that fails any active check is out, no partial credit.
    pub fn in_scope(&self, candidate: &Url) -> bool {
        let host_allowed = match &self.mode {
            ScopeMode::ExactHost => candidate.host_str() == Some(self.seed_hostname.as_str()),
            ScopeMode::AnySubdomain(matcher) => matcher.is_match(candidate.as_str()),
        };

        if !host_allowed {
            return false;
        }

        match &self.path_prefix {
            Some(prefix) => candidate.path().starts_with(prefix.as_str()),
            None => true,
        }
    }
}
