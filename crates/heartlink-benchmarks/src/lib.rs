#![warn(missing_docs)]
//! # heartlink-benchmarks
//!
//! Test-only crate holding bounded NFR smoke checks for the codec and the
//! evasive controller. See `tests/nfr_smoke.rs`.
