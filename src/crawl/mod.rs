// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine itself.
//
// Submodules:
// - scope: Decides which discovered URLs belong to a seed's crawl
// - worker: One seed's breadth-first traversal (frontier + visited set)
// - sink: The single consumer that renders discovered links to output
// - engine: The orchestrator tying workers, permits, and sink together
//
// Everything concurrent lives under this module; the fetch and extract
// modules it calls into are plain async functions with no shared state.
// =============================================================================

mod engine;
pub mod scope;
pub mod sink;
mod worker;

// Re-export the engine's public surface
pub use engine::run_crawl;
pub use scope::ScopePolicy;
pub use sink::DiscoveredLink;
