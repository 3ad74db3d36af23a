//! Integration tests for the Padma Bazar storefront.
//!
//! The `tests/` directory holds two kinds of tests:
//! - Bridge tests that exercise the storefront library directly (always run)
//! - End-to-end page tests against a running storefront (`#[ignore]`d; they
//!   need a server and a reachable commerce backend)
//!
//! Run the end-to-end suite with:
//! `STOREFRONT_URL=http://localhost:3000 cargo test -p padma-integration-tests -- --ignored`

#![cfg_attr(not(test), forbid(unsafe_code))]
