use revfs_ordered_index::{Iter, Key, OrderedIndex};
use tracing::trace;

use super::{
	config::NamespaceConfig,
	error::NamespaceError,
	record::{check_name_len, DirectoryRecord, FileRecord},
};

/// Two-level index of the overlay: directories by key, each with its own file index.
///
/// Keys come from the path-to-key allocator of the surrounding filesystem layer. The
/// namespace does no locking of its own; callers serialize mutations, snapshots and
/// restores of the same namespace.
#[derive(Debug, PartialEq, Eq)]
pub struct Namespace<R> {
	config: NamespaceConfig,
	directories: OrderedIndex<DirectoryRecord<R>>,
}

impl<R> Namespace<R> {
	#[must_use]
	pub fn new() -> Self {
		Self::with_config(NamespaceConfig::default())
	}

	#[must_use]
	pub const fn with_config(config: NamespaceConfig) -> Self {
		Self {
			config,
			directories: OrderedIndex::with_order(config.index_order),
		}
	}

	#[must_use]
	pub const fn config(&self) -> &NamespaceConfig {
		&self.config
	}

	/// Number of directories.
	#[must_use]
	pub const fn len(&self) -> usize {
		self.directories.len()
	}

	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.directories.is_empty()
	}

	/// Number of files across every directory.
	#[must_use]
	pub fn file_count(&self) -> usize {
		self.directories
			.values()
			.map(DirectoryRecord::file_count)
			.sum()
	}

	/// Returns the directory under `key`, creating it with an empty file index when absent.
	///
	/// `name` is only stored when the directory gets created.
	pub fn resolve_directory(
		&mut self,
		key: Key,
		name: &[u8],
	) -> Result<&mut DirectoryRecord<R>, NamespaceError> {
		check_name_len(name)?;

		let order = self.config.index_order;
		Ok(self.directories.get_or_insert_with(key, || {
			trace!(key, directory = %String::from_utf8_lossy(name), "Creating directory record");
			DirectoryRecord::with_checked_name(name.to_vec(), order)
		}))
	}

	/// Returns the file `file_key` of directory `dir_key`, creating the file when absent.
	pub fn resolve_file(
		&mut self,
		dir_key: Key,
		file_key: Key,
		name: &[u8],
	) -> Result<&mut FileRecord<R>, NamespaceError> {
		let capacity = self.config.revision_capacity;

		self.directories
			.get_mut(dir_key)
			.ok_or(NamespaceError::DirectoryNotFound(dir_key))?
			.resolve_file(file_key, name, capacity)
	}

	/// Inserts a fully built directory, failing if `key` is already used.
	pub fn insert_directory(
		&mut self,
		key: Key,
		directory: DirectoryRecord<R>,
	) -> Result<(), NamespaceError> {
		trace!(key, directory = %directory.display_name(), "Inserting directory record");

		self.directories.insert(key, directory).map_err(Into::into)
	}

	#[must_use]
	pub fn directory(&self, key: Key) -> Option<&DirectoryRecord<R>> {
		self.directories.get(key)
	}

	pub fn directory_mut(&mut self, key: Key) -> Option<&mut DirectoryRecord<R>> {
		self.directories.get_mut(key)
	}

	/// Directories in ascending key order.
	#[must_use]
	pub fn directories(&self) -> Iter<'_, DirectoryRecord<R>> {
		self.directories.iter()
	}

	#[must_use]
	pub fn file(&self, dir_key: Key, file_key: Key) -> Option<&FileRecord<R>> {
		self.directories.get(dir_key)?.file(file_key)
	}

	pub fn file_mut(&mut self, dir_key: Key, file_key: Key) -> Option<&mut FileRecord<R>> {
		self.directories.get_mut(dir_key)?.file_mut(file_key)
	}

	/// Commits a revision to an existing file, returning the revision it evicted, if any.
	pub fn append_revision(
		&mut self,
		dir_key: Key,
		file_key: Key,
		revision: R,
	) -> Result<Option<R>, NamespaceError> {
		let file = self
			.file_mut(dir_key, file_key)
			.ok_or(NamespaceError::FileNotFound {
				directory: dir_key,
				file: file_key,
			})?;

		Ok(file.append_revision(revision))
	}

	/// Drops a directory along with every file and revision it owns.
	pub fn remove_directory(&mut self, key: Key) -> Option<DirectoryRecord<R>> {
		self.directories.remove(key)
	}

	pub fn remove_file(&mut self, dir_key: Key, file_key: Key) -> Option<FileRecord<R>> {
		self.directories.get_mut(dir_key)?.remove_file(file_key)
	}
}

impl<R> Default for Namespace<R> {
	fn default() -> Self {
		Self::new()
	}
}
