use revfs_ordered_index::{DuplicateKeyError, Key};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
	#[error("record name is {len} bytes long, names are limited to {max} bytes", max = u16::MAX)]
	NameTooLong { len: usize },
	#[error("directory not found <key='{0}'>")]
	DirectoryNotFound(Key),
	#[error("file not found <directory='{directory}', key='{file}'>")]
	FileNotFound { directory: Key, file: Key },

	#[error(transparent)]
	DuplicateKey(#[from] DuplicateKeyError),
}
