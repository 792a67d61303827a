//! # Volt Cache
//!
//! The seam between whatever keeps entity state current and the permission
//! calculator that reads it.
//!
//! ## Key Types
//!
//! - [`Cache`] - Read/write access to servers, members, channels and users
//! - [`CacheExt`] - Lookups composed from [`Cache`] reads
//! - [`MemoryCache`] - `RwLock`-guarded hash maps
//!
//! ## Usage
//!
//! ```rust
//! use volt_cache::{Cache, MemoryCache};
//! use volt_core::{Server, ServerId};
//!
//! let cache = MemoryCache::new();
//! cache.upsert_server(Server::new("S", "OWNER", "example")).unwrap();
//!
//! let server = cache.get_server(&ServerId::new("S")).unwrap();
//! assert!(server.is_some());
//! ```

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{CacheError, Result};
pub use memory::MemoryCache;
pub use traits::{Cache, CacheExt};
