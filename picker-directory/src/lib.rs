//! Entity directory access for the slotted entity picker.
//!
//! The directory is the source of truth for entity records. The picker
//! consumes it through the [`EntityDirectory`] trait, which supports:
//! - batch lookup by ids (initial enrichment on mount)
//! - single lookup by id (enrichment on dialog confirm)
//! - paged free-text search with an exclusion set (query-as-you-type)
//!
//! Two implementations ship with the crate:
//! - [`MemoryDirectory`]: a fixed record list, used by the development
//!   server and tests
//! - [`HttpDirectory`]: a `reqwest` client for the directory HTTP API
//!
//! The [`mock`] module wraps a memory directory with call recording,
//! injected failures and latency.
//!
//! # Example
//!
//! ```
//! use picker_directory::{MemoryDirectory, SearchQuery};
//! use picker_types::{Entity, EntityId};
//!
//! let directory = MemoryDirectory::new(vec![
//!     Entity::new("u1").with_field("first_name", "Ann"),
//! ]);
//! assert_eq!(directory.len(), 1);
//!
//! let query = SearchQuery::new("ann").excluding([EntityId::from("u2")]);
//! assert_eq!(query.text, "ann");
//! ```

mod directory;
mod error;
pub mod http;
pub mod memory;
pub mod mock;

pub use directory::{DEFAULT_PAGE_SIZE, EntityDirectory, MAX_PAGE_SIZE, SearchQuery};
pub use error::{DirectoryError, DirectoryResult};
pub use http::{HttpDirectory, HttpDirectoryConfig};
pub use memory::MemoryDirectory;
