use std::{
	fs, io,
	num::NonZeroU8,
	path::Path,
};

use revfs_ordered_index::Order;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::revision::REV_TRUNCATE;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("failed to read namespace config <path='{}'>: {source}", .path.display())]
	Read {
		path: Box<Path>,
		#[source]
		source: io::Error,
	},
	#[error("malformed namespace config <path='{}'>: {source}", .path.display())]
	Malformed {
		path: Box<Path>,
		#[source]
		source: serde_json::Error,
	},
}

/// Shape parameters shared by every index and revision log of a namespace.
///
/// Missing fields fall back to their defaults, so an empty JSON object is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
	/// Branching factor of the directory index and every file index.
	pub index_order: Order,
	/// How many revisions each file keeps before the oldest gets evicted.
	pub revision_capacity: NonZeroU8,
}

impl Default for NamespaceConfig {
	fn default() -> Self {
		Self {
			index_order: Order::DEFAULT,
			revision_capacity: REV_TRUNCATE,
		}
	}
}

impl NamespaceConfig {
	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();

		let contents = fs::read(path).map_err(|source| ConfigError::Read {
			path: path.into(),
			source,
		})?;

		serde_json::from_slice(&contents).map_err(|source| ConfigError::Malformed {
			path: path.into(),
			source,
		})
	}
}
