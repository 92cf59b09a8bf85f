//! # Namespace
//!
//! Persistent namespace index of the revfs overlay. It tracks directories, the files in
//! each directory and a bounded history of revisions per file, and round-trips all of
//! it through a compact binary snapshot so the overlay survives restarts.
//!
//! Revision contents belong to the content store; here they are opaque fixed-size
//! records implementing [`Revision`].
//!
//! ```
//! use revfs_namespace::{dump, load, Namespace, NamespaceConfig, RawRevision};
//!
//! let mut namespace = Namespace::<RawRevision<4>>::new();
//! namespace.resolve_directory(1, b"docs")?;
//! namespace.resolve_file(1, 1, b"a.txt")?;
//! namespace.append_revision(1, 1, RawRevision(*b"rev0"))?;
//!
//! let mut snapshot = Vec::new();
//! dump(&namespace, &mut snapshot)?;
//!
//! let restored = load::<RawRevision<4>>(&mut snapshot.as_slice(), NamespaceConfig::default())?;
//! assert_eq!(restored, namespace);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod codec;
mod config;
mod error;
mod record;
mod revision;
mod snapshot;
mod store;

pub use codec::{dump, load, DecodeError, EncodeError};
pub use config::{ConfigError, NamespaceConfig};
pub use error::NamespaceError;
pub use record::{DirectoryRecord, FileRecord};
pub use revision::{RawRevision, Revision, RevisionLog, REV_TRUNCATE};
pub use snapshot::{load_snapshot, save_snapshot, SnapshotError};
pub use store::Namespace;

pub use revfs_ordered_index::{Key, Order};
