//! Shared harness for the plant shop integration tests.
//!
//! Tests drive the real router through `axum-test` against an in-process
//! mock of the commerce API.

pub mod mocks;
