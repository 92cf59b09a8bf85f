use std::io::{self, Write};

use revfs_ordered_index::Key;
use thiserror::Error;
use tracing::{instrument, trace};

use crate::{DirectoryRecord, Namespace, Revision};

#[derive(Error, Debug)]
pub enum EncodeError {
	#[error("too many {kind} records to encode <count={count}>")]
	TooManyRecords { kind: &'static str, count: usize },
	#[error("too many revisions to encode <count={0}>")]
	TooManyRevisions(usize),
	#[error("record name too long to encode <len={0}>")]
	NameTooLong(usize),

	#[error("failed to write snapshot stream: {0}")]
	Io(#[from] io::Error),
}

/// Writes the whole namespace to `out`, directories and files in ascending key order.
#[instrument(skip_all, fields(directories = namespace.len()), err)]
pub fn dump<R: Revision>(namespace: &Namespace<R>, out: &mut impl Write) -> Result<(), EncodeError> {
	count(out, "directory", namespace.len())?;

	for (key, directory) in namespace.directories() {
		record_header(out, key, directory.name())?;

		trace!(
			key,
			directory = %directory.display_name(),
			files = directory.file_count(),
			"Dumping directory"
		);

		files(out, directory)?;
	}

	Ok(())
}

fn files<R: Revision>(out: &mut impl Write, directory: &DirectoryRecord<R>) -> Result<(), EncodeError> {
	count(out, "file", directory.file_count())?;

	let mut buf = vec![0; R::SIZE];

	for (key, file) in directory.files() {
		record_header(out, key, file.name())?;

		let history = file.history();
		let revisions =
			u8::try_from(history.len()).map_err(|_| EncodeError::TooManyRevisions(history.len()))?;
		out.write_all(&[revisions])?;

		for revision in history.chronological() {
			revision.write_bytes(&mut buf);
			out.write_all(&buf)?;
		}

		trace!(key, file = %file.display_name(), revisions, "Dumped file");
	}

	Ok(())
}

fn count(out: &mut impl Write, kind: &'static str, count: usize) -> Result<(), EncodeError> {
	let encoded = u16::try_from(count).map_err(|_| EncodeError::TooManyRecords { kind, count })?;
	out.write_all(&encoded.to_le_bytes()).map_err(Into::into)
}

/// Key followed by the length-prefixed name.
fn record_header(out: &mut impl Write, key: Key, name: &[u8]) -> Result<(), EncodeError> {
	let len = u16::try_from(name.len()).map_err(|_| EncodeError::NameTooLong(name.len()))?;

	out.write_all(&key.to_le_bytes())?;
	out.write_all(&len.to_le_bytes())?;
	out.write_all(name).map_err(Into::into)
}
