use std::{borrow::Cow, num::NonZeroU8};

use revfs_ordered_index::{Iter, Key, Order, OrderedIndex};
use tracing::trace;

use super::{error::NamespaceError, revision::RevisionLog};

/// Rejects names that cannot be length-prefixed with a `u16`.
pub(crate) fn check_name_len(name: &[u8]) -> Result<(), NamespaceError> {
	if u16::try_from(name.len()).is_err() {
		return Err(NamespaceError::NameTooLong { len: name.len() });
	}

	Ok(())
}

/// A directory of the overlay together with the index of its files.
#[derive(Debug, PartialEq, Eq)]
pub struct DirectoryRecord<R> {
	name: Vec<u8>,
	files: OrderedIndex<FileRecord<R>>,
}

impl<R> DirectoryRecord<R> {
	/// Creates a directory with an empty file index.
	pub fn new(name: impl Into<Vec<u8>>, order: Order) -> Result<Self, NamespaceError> {
		let name = name.into();
		check_name_len(&name)?;

		Ok(Self::with_checked_name(name, order))
	}

	pub(crate) const fn with_checked_name(name: Vec<u8>, order: Order) -> Self {
		Self {
			name,
			files: OrderedIndex::with_order(order),
		}
	}

	#[must_use]
	pub fn name(&self) -> &[u8] {
		&self.name
	}

	#[must_use]
	pub fn display_name(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.name)
	}

	#[must_use]
	pub fn file(&self, key: Key) -> Option<&FileRecord<R>> {
		self.files.get(key)
	}

	pub fn file_mut(&mut self, key: Key) -> Option<&mut FileRecord<R>> {
		self.files.get_mut(key)
	}

	/// Files of this directory in ascending key order.
	#[must_use]
	pub fn files(&self) -> Iter<'_, FileRecord<R>> {
		self.files.iter()
	}

	#[must_use]
	pub fn file_count(&self) -> usize {
		self.files.len()
	}

	/// Returns the file under `key`, creating it with an empty history when absent.
	///
	/// `name` is only stored when the file gets created.
	pub fn resolve_file(
		&mut self,
		key: Key,
		name: &[u8],
		revision_capacity: NonZeroU8,
	) -> Result<&mut FileRecord<R>, NamespaceError> {
		check_name_len(name)?;

		Ok(self.files.get_or_insert_with(key, || {
			trace!(key, file = %String::from_utf8_lossy(name), "Creating file record");
			FileRecord {
				name: name.to_vec(),
				history: RevisionLog::new(revision_capacity),
			}
		}))
	}

	pub fn insert_file(&mut self, key: Key, file: FileRecord<R>) -> Result<(), NamespaceError> {
		trace!(
			directory = %self.display_name(),
			file = %file.display_name(),
			key,
			"Inserting file record"
		);

		self.files.insert(key, file).map_err(Into::into)
	}

	pub fn remove_file(&mut self, key: Key) -> Option<FileRecord<R>> {
		self.files.remove(key)
	}
}

/// A file of the overlay and its bounded revision history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord<R> {
	name: Vec<u8>,
	history: RevisionLog<R>,
}

impl<R> FileRecord<R> {
	/// Creates a file without any revision yet.
	pub fn new(
		name: impl Into<Vec<u8>>,
		revision_capacity: NonZeroU8,
	) -> Result<Self, NamespaceError> {
		let name = name.into();
		check_name_len(&name)?;

		Ok(Self {
			name,
			history: RevisionLog::new(revision_capacity),
		})
	}

	#[must_use]
	pub fn name(&self) -> &[u8] {
		&self.name
	}

	#[must_use]
	pub fn display_name(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.name)
	}

	#[must_use]
	pub const fn history(&self) -> &RevisionLog<R> {
		&self.history
	}

	pub fn history_mut(&mut self) -> &mut RevisionLog<R> {
		&mut self.history
	}

	/// Commits a revision, returning the oldest one if the history was full.
	pub fn append_revision(&mut self, revision: R) -> Option<R> {
		self.history.append(revision)
	}
}
