//! Case corpus storage and lookup.
//!
//! The catalog holds the read-only set of drill cases: their clues in reveal
//! order and the rubric each is graded against. An embedded corpus is
//! compiled into the binary, but custom corpora can also be loaded from JSON
//! files.
//!
//! ## Embedded Corpus
//!
//! The default corpus covers classic production incidents across categories:
//! connection pool exhaustion, stale DNS after failover, log rotation filling
//! a disk, cache stampedes, clock skew breaking auth, and an unbounded queue
//! being OOM-killed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use incident_drill::CaseCatalog;
//! use incident_drill::catalog::store::CaseFilter;
//! use incident_drill::core::types::CaseId;
//!
//! // Load embedded corpus
//! let catalog = CaseCatalog::load_embedded().unwrap();
//!
//! // List summaries (never the solutions)
//! for summary in catalog.list(&CaseFilter::default()) {
//!     println!("{} [{}]", summary.id, summary.difficulty);
//! }
//!
//! // Get a specific case
//! let case = catalog.get(&CaseId::new("connection-pool-exhaustion"));
//! ```
//!
//! ## Custom Corpora
//!
//! Custom corpora can be created by exporting and modifying the embedded one:
//!
//! ```rust,no_run
//! use incident_drill::CaseCatalog;
//! use std::path::Path;
//!
//! // Export to JSON
//! let catalog = CaseCatalog::load_embedded().unwrap();
//! let json = catalog.to_json().unwrap();
//!
//! // Load from custom file
//! let custom = CaseCatalog::load_from_file(Path::new("my_cases.json")).unwrap();
//! ```

pub mod loader;
pub mod store;
