//! Cache Module
//!
//! Single-slot sentiment snapshot cache with stale-while-revalidate reads,
//! single-flight refresh, and bounded waiting.

mod state;
mod stats;
mod store;
mod wait;


// Re-export public types
pub use state::{CacheDiagnostics, CacheState};
pub use stats::CacheStats;
pub use store::SentimentCache;
pub use wait::wait_until;
