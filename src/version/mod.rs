//! Version resolution layer for Go releases
//!
//! This module provides the core functionality for parsing, ordering and
//! caching Go release versions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Catalog   │◀───▶│    Cache    │
//! │  (fetch)    │     │  (resolve)  │     │ (snapshot)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │    Sort     │────▶│   Semver    │
//!                     │  (group)    │     │  (grammar)  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: Version grammar (normalization, pre-release detection, parsing)
//! - [`sort`]: Ordering, family grouping and latest-stable selection
//! - [`cache`]: JSON snapshot of the remote catalog with a time-to-live
//! - [`registry`]: Trait for fetching release versions from a remote source
//! - [`registries`]: Concrete registry implementations
//! - [`catalog`]: Cache-first resolution of the remote catalog
//! - [`error`]: Error types for the version layer

pub mod cache;
pub mod catalog;
pub mod error;
pub mod registries;
pub mod registry;
pub mod semver;
pub mod sort;
