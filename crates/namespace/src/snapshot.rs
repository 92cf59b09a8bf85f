use std::{
	fs::File,
	io::{self, BufReader, BufWriter, Read},
	path::Path,
};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, instrument};

use super::{
	codec::{dump, load, DecodeError, EncodeError},
	Namespace, NamespaceConfig, Revision,
};

#[derive(Error, Debug)]
pub enum SnapshotError {
	#[error("no namespace snapshot <path='{}'>", .0.display())]
	NotFound(Box<Path>),
	#[error("namespace snapshot has trailing bytes <path='{}'>", .0.display())]
	TrailingBytes(Box<Path>),
	#[error("namespace snapshot I/O error <path='{}'>: {source}", .path.display())]
	FileIO {
		path: Box<Path>,
		#[source]
		source: io::Error,
	},

	#[error(transparent)]
	Encode(#[from] EncodeError),
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Dumps the namespace into `path`, replacing any previous snapshot atomically.
///
/// The snapshot is first written and synced to a temporary file next to `path`, so an
/// interrupted save leaves the previous snapshot intact.
#[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
pub fn save_snapshot<R: Revision>(
	namespace: &Namespace<R>,
	path: impl AsRef<Path>,
) -> Result<(), SnapshotError> {
	let path = path.as_ref();
	let file_io = |source: io::Error| SnapshotError::FileIO {
		path: path.into(),
		source,
	};

	let dir = path
		.parent()
		.filter(|parent| !parent.as_os_str().is_empty())
		.unwrap_or_else(|| Path::new("."));

	let mut writer = BufWriter::new(NamedTempFile::new_in(dir).map_err(file_io)?);
	dump(namespace, &mut writer)?;

	let temp = writer
		.into_inner()
		.map_err(|e| file_io(e.into_error()))?;
	temp.as_file().sync_all().map_err(file_io)?;
	temp.persist(path).map_err(|e| file_io(e.error))?;

	debug!(
		directories = namespace.len(),
		files = namespace.file_count(),
		"Saved namespace snapshot"
	);

	Ok(())
}

/// Restores a namespace from a snapshot written by [`save_snapshot`].
///
/// A missing file is reported as [`SnapshotError::NotFound`], letting callers decide to
/// start over with an empty namespace.
#[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
pub fn load_snapshot<R: Revision>(
	path: impl AsRef<Path>,
	config: NamespaceConfig,
) -> Result<Namespace<R>, SnapshotError> {
	let path = path.as_ref();

	let file = File::open(path).map_err(|source| {
		if source.kind() == io::ErrorKind::NotFound {
			SnapshotError::NotFound(path.into())
		} else {
			SnapshotError::FileIO {
				path: path.into(),
				source,
			}
		}
	})?;

	let mut reader = BufReader::new(file);
	let namespace = load(&mut reader, config)?;

	// One namespace per snapshot, anything after it means the file is not ours
	let mut probe = [0; 1];
	match reader.read(&mut probe) {
		Ok(0) => {}
		Ok(_) => return Err(SnapshotError::TrailingBytes(path.into())),
		Err(source) => {
			return Err(SnapshotError::FileIO {
				path: path.into(),
				source,
			})
		}
	}

	debug!(
		directories = namespace.len(),
		files = namespace.file_count(),
		"Loaded namespace snapshot"
	);

	Ok(namespace)
}
