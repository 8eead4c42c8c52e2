//! linkshelf-core: link organizer backed by a remote spreadsheet API
//!
//! This library provides:
//! - A gateway to the remote link store (fetch all, append, delete by row)
//! - An in-memory repository mirroring the last fetched snapshot
//! - A pure query engine (search, sort, paginate)
//! - A mutation coordinator emulating update as delete + re-insert
//! - View projection (display URLs, tag chips, counters)
//! - JSON backup export and import
//!
//! # Example
//!
//! ```
//! use linkshelf_core::domain::{LinkId, LinkRecord};
//! use linkshelf_core::query::{project, QueryState};
//!
//! let records = vec![
//!     LinkRecord::new(LinkId::new("1"), "https://a.io", "Rust blog", vec!["blog".into()], 1),
//!     LinkRecord::new(LinkId::new("2"), "https://b.io", "Recipes", vec![], 2),
//! ];
//! let page = project(&records, &QueryState::new().with_term("blog"), 10);
//! assert_eq!(page.total_count, 1);
//! ```

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod http;
pub mod import;
pub mod mutation;
pub mod projection;
pub mod query;
pub mod repository;
pub mod session;
pub mod store;

pub use clock::{Clock, IdGenerator, ManualClock, SystemClock};
pub use config::{ConfigError, LinkshelfConfig};
pub use domain::{LinkId, LinkRecord, RawLinkRecord, ValidationError};
pub use error::{LinkshelfError, Result};
pub use export::{ExportError, DEFAULT_BACKUP_FILE_NAME};
pub use import::ImportError;
pub use mutation::{
    EditMode, LinkDraft, MutationCoordinator, MutationError, MutationOutcome, MutationSettings,
    PendingReload, PendingRemoval,
};
pub use projection::{link_views, page_summary, LinkView, PageSummary};
pub use query::{project, EmptyState, Projection, QueryState, SortKey};
pub use repository::{LinkRepository, LoadReport, LoadStatus, SharedRepository};
pub use session::{Credential, Session, SessionError};
pub use store::{MemoryStore, RecordStore, StoreError};
#[cfg(feature = "native")]
pub use store::SheetStore;

/// Returns the version of linkshelf-core
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
