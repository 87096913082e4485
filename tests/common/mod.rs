//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-memory application driven through `tower::ServiceExt::oneshot`
//! - Authentication test helpers
//! - A multipart body builder for upload tests
//! - Envelope assertions

#![allow(dead_code)]

pub mod app;
pub mod assertions;
pub mod auth_helpers;
pub mod multipart;

// Re-export commonly used utilities
pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
pub use multipart::*;
