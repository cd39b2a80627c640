//! Common test utilities for seagrid.
//!
//! This module provides shared grid builders and assertions for the integration tests.

#![allow(dead_code)]

pub mod assertions;
pub mod test_data;
