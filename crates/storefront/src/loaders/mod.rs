//! Per-route server-side data loaders.
//!
//! One loader per page type. Each loader:
//!
//! 1. fetches its remote resources concurrently (`tokio::try_join!` - the
//!    whole phase fails if any fetch in it fails),
//! 2. normalizes query parameters into backend filter parameters,
//! 3. merges results with the page's built metadata, and
//! 4. returns an [`InitialData`](crate::initial_data::InitialData) bag
//!    consumed both for rendering and for the client-side hydration embed.
//!
//! # Error policy
//!
//! Backend failures propagate unmodified to the handler - no retries, no
//! backoff, no timeouts at this layer. Two conditions are explicitly soft:
//! absent SEO metadata (fallbacks apply) and absent product/category (a JSON
//! null sentinel in the bag; the page renders a not-found state).
//!
//! # Keys
//!
//! Each loader documents its fixed key set in a `keys` module or `*_key`
//! functions; keys are namespaced per loader so they cannot collide.

pub mod category;
pub mod home;
pub mod listing;
pub mod product;
