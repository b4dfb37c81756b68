#![warn(missing_docs)]
//! # heartlink-contract-tests
//!
//! Test-only crate pinning the frozen token-record wire contract under
//! `contracts/`. See `tests/contract_validation.rs`.
