//! Tributary Identity Resolver
//!
//! Maps free-text artist names to stable registry identifiers and back to
//! display names.
//!
//! # Architecture
//!
//! ```text
//! name ─▶ IdentityResolver ─▶ ResolutionCache (name → id) ─┐
//!                          └▶ ResolutionCache (id → name) ─┤
//!                                                          ▼
//!                                  RateLimiter ─▶ IdentityRegistry (HTTP / mock)
//! ```
//!
//! - Positive and negative results are cached with separate TTLs
//! - Concurrent lookups of the same key share one outbound call
//! - Outbound calls are spaced by a process-wide minimum interval
//! - Transient network failures are retried once; every other failure is a
//!   cached miss, never an error
//!
//! # Example
//!
//! ```
//! use tributary_identity::{IdentityResolver, MockRegistry, ResolverConfig};
//!
//! # async fn example() {
//! let registry = MockRegistry::new().with_artist("Radiohead", "a74b1b7f", 100);
//! let resolver = IdentityResolver::new(registry, ResolverConfig::unthrottled());
//!
//! let resolved = resolver.resolve("radiohead").await.unwrap();
//! assert_eq!(resolved.id, "a74b1b7f");
//! assert_eq!(resolved.canonical_name.as_deref(), Some("Radiohead"));
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod error;
pub mod mock;
pub mod musicbrainz;
pub mod rate_limit;
pub mod registry;
pub mod resolver;

pub use cache::ResolutionCache;
pub use config::ResolverConfig;
pub use error::RegistryError;
pub use mock::MockRegistry;
pub use musicbrainz::MusicBrainzRegistry;
pub use rate_limit::RateLimiter;
pub use registry::{ArtistMatch, IdentityRegistry};
pub use resolver::{IdentityResolver, ResolvedArtist};
