//! End-to-end test support for lembra
//!
//! Shared harness utilities for the journey tests under `tests/`.

pub mod harness;
