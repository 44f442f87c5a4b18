//! Owned deep copies of extension chains.
//!
//! Callers describe parameters as borrowed records linked through `next`
//! ([`Extensible`]). The [`Copier`] turns such a chain into owned records
//! ([`OwnedExtensible`]) whose buffers, strings, nested records and links are
//! all fresh allocations, so the copy outlives and ignores whatever happens to
//! the caller's memory afterwards.
//!
//! ```ignore
//! let app = ApplicationInfo { application_name: Some("demo"), ..Default::default() };
//! let info = InstanceCreateInfo { application_info: Some(&app), ..Default::default() };
//! let owned = OwnedInstanceCreateInfo::from_source(&info, None)?;
//! ```

pub mod catalog;
pub mod chain;
pub mod config;
pub mod copy;
pub mod error;
pub mod record;
pub mod types;

pub use catalog::{Catalog, CatalogEntry, CopyFn, Registry};
pub use chain::Chain;
pub use config::CopyConfig;
pub use copy::{Copier, CopyCx, CopyState};
pub use error::CopyError;
pub use record::{Extensible, OwnedExtensible, OwnedRecord, find_source};
pub use types::{ChainIter, SourceIter, TypeTag};
