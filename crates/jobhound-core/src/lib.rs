//! # jobhound Core
//!
//! The scrape pipeline behind `jobhound search`:
//!
//! ```text
//! open session -> navigate -> dismiss consent -> load listings
//!     -> extract records -> assemble -> (export) -> close session
//! ```
//!
//! The browser is reached only through the [`DriverSession`] trait, so the
//! pipeline runs unchanged against Chrome or an in-memory page.

pub mod assembler;
pub mod consent;
pub mod driver;
pub mod error;
pub mod export;
pub mod extractor;
pub mod loader;
pub mod search;
pub mod types;

#[cfg(test)]
pub(crate) mod fixture;

pub use assembler::assemble;
pub use consent::dismiss_consent;
pub use driver::{wait_until, DriverLauncher, DriverSession, NodeRef, SCROLL_TO_BOTTOM};
pub use error::{DriverError, ExportError, SearchError};
pub use export::{CsvWriter, ExportCapabilities, ExportFormat, ExportOutcome, ExportSink, TableWriter};
pub use extractor::{extract, parse_posted_date};
pub use loader::{load_listings, LoadOutcome, LoadStop, LoaderSettings};
pub use search::{build_search_url, JobSearch};
pub use types::{JobRecord, ResultSet, SearchQuery, COLUMNS, DEFAULT_LOCATION};
