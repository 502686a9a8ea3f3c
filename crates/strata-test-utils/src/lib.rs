//! Test utilities and fixtures for Strata development.
//!
//! Provides deterministic volume fixtures (see [`fixtures`]) and a
//! logging hook for tests that want to see the `log` output of the
//! library crates.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{checkerboard_volume, pattern_biome, patterned_volume, uniform_volume};

/// Route `log` output to the test harness.
///
/// Honours `RUST_LOG`; defaults to `debug` for the Strata crates. Safe to
/// call from every test: only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("strata_volume=debug"),
    )
    .is_test(true)
    .try_init();
}
