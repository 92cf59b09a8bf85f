//! # Ordered Index
//!
//! In-memory B+tree mapping small integer keys to owned values. It backs both levels of
//! the revfs namespace: the directory index and the per-directory file indexes.
//!
//! Records are kept exclusively in leaves, and leaves are chained left to right, so a full
//! scan in ascending key order is a linear walk over the chain. Snapshot encoding relies on
//! that walk to emit records in a stable order.
//!
//! ```
//! use revfs_ordered_index::{OrderedIndex, Order};
//!
//! let mut index = OrderedIndex::with_order(Order::new(3).unwrap());
//! for key in [30, 10, 20, 40] {
//!     index.insert(key, format!("record {key}")).unwrap();
//! }
//!
//! assert!(index.insert(10, String::new()).is_err());
//! assert_eq!(index.get(20).map(String::as_str), Some("record 20"));
//! assert_eq!(index.keys().collect::<Vec<_>>(), [10, 20, 30, 40]);
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

mod error;
mod iter;
mod node;
mod tree;

pub use error::{DuplicateKeyError, InvalidOrderError};
pub use iter::{Iter, Keys, Values};
pub use node::Order;
pub use tree::OrderedIndex;

/// Keys are handed out by the path-to-key allocator outside of this crate.
pub type Key = u16;
