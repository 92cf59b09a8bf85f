use std::{
	io::{self, Read},
	num::NonZeroU8,
};

use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

use crate::{DirectoryRecord, FileRecord, Namespace, NamespaceConfig, NamespaceError, Revision};

#[derive(Error, Debug)]
pub enum DecodeError {
	/// The stream ended before the format said it would; nothing of it can be trusted.
	#[error("snapshot stream truncated while reading {field}")]
	Truncated { field: &'static str },
	#[error("snapshot stream holds an inconsistent namespace: {0}")]
	Corrupt(#[from] NamespaceError),

	#[error("failed to read {field} from snapshot stream: {source}")]
	Io {
		field: &'static str,
		#[source]
		source: io::Error,
	},
}

/// Rebuilds a namespace from a stream written by [`dump`](super::dump).
///
/// Any failure discards everything read so far; a half-restored namespace is never
/// handed out.
#[instrument(skip_all, err)]
pub fn load<R: Revision>(
	input: &mut impl Read,
	config: NamespaceConfig,
) -> Result<Namespace<R>, DecodeError> {
	let mut namespace = Namespace::with_config(config);

	let directories = read_u16(input, "directory count")?;

	for _ in 0..directories {
		let key = read_u16(input, "directory key")?;
		let name = read_name(input, "directory name")?;
		let mut directory = DirectoryRecord::new(name, config.index_order)?;

		trace!(key, directory = %directory.display_name(), "Loading directory");

		load_files(input, &mut directory, config.revision_capacity)?;
		namespace.insert_directory(key, directory)?;
	}

	debug!(
		directories = namespace.len(),
		files = namespace.file_count(),
		"Loaded namespace"
	);

	Ok(namespace)
}

fn load_files<R: Revision>(
	input: &mut impl Read,
	directory: &mut DirectoryRecord<R>,
	revision_capacity: NonZeroU8,
) -> Result<(), DecodeError> {
	let files = read_u16(input, "file count")?;
	let mut buf = vec![0; R::SIZE];

	for _ in 0..files {
		let key = read_u16(input, "file key")?;
		let name = read_name(input, "file name")?;
		let mut file = FileRecord::new(name, revision_capacity)?;

		let revisions = read_u8(input, "revision count")?;
		if revisions > revision_capacity.get() {
			warn!(
				file = %file.display_name(),
				revisions,
				capacity = revision_capacity.get(),
				"Snapshot holds more revisions than the configured capacity, keeping the newest"
			);
		}

		// Replaying oldest first rebuilds the ring no matter where the writer's ring wrapped
		for _ in 0..revisions {
			read_exact(input, &mut buf, "revision")?;
			file.append_revision(R::from_bytes(&buf));
		}

		trace!(key, file = %file.display_name(), revisions, "Loaded file");

		directory.insert_file(key, file)?;
	}

	Ok(())
}

fn read_exact(input: &mut impl Read, buf: &mut [u8], field: &'static str) -> Result<(), DecodeError> {
	input.read_exact(buf).map_err(|source| {
		if source.kind() == io::ErrorKind::UnexpectedEof {
			DecodeError::Truncated { field }
		} else {
			DecodeError::Io { field, source }
		}
	})
}

fn read_u8(input: &mut impl Read, field: &'static str) -> Result<u8, DecodeError> {
	let mut buf = [0; 1];
	read_exact(input, &mut buf, field)?;
	Ok(buf[0])
}

fn read_u16(input: &mut impl Read, field: &'static str) -> Result<u16, DecodeError> {
	let mut buf = [0; 2];
	read_exact(input, &mut buf, field)?;
	Ok(u16::from_le_bytes(buf))
}

/// Reads a `u16` length prefix and that many name bytes.
fn read_name(input: &mut impl Read, field: &'static str) -> Result<Vec<u8>, DecodeError> {
	let len = read_u16(input, field)?;
	let mut name = vec![0; usize::from(len)];
	read_exact(input, &mut name, field)?;
	Ok(name)
}
