//! # Volt Testkit
//!
//! Testing utilities for Volt.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Scenario vectors**: Hand-checked situations with expected permissions
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A populated memory cache and a sample wire snapshot
//!
//! ## Scenario Vectors
//!
//! ```rust
//! use volt_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     assert_eq!(vector.resolve(), vector.expected, "{}", vector.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use volt_testkit::generators::ServerParams;
//!
//! proptest! {
//!     #[test]
//!     fn owner_gets_everything(params: ServerParams) {
//!         let params = params.owned();
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use volt_core::{PermissionOverride, Permissions};
//! use volt_testkit::fixtures::TestFixture;
//!
//! let cache = TestFixture::new(Permissions::VIEW_ONLY)
//!     .role("MOD", 1, PermissionOverride::allowing(Permissions::KICK_MEMBERS))
//!     .member("U", &["MOD"])
//!     .into_cache();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fixed_now, Snapshot, TestFixture, SAMPLE_SNAPSHOT};
pub use generators::ServerParams;
pub use vectors::{all_vectors, verify_all_vectors, Query, ScenarioVector};
