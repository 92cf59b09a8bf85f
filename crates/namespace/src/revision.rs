use std::{fmt, num::NonZeroU8};

/// Capacity of a [`RevisionLog`] unless configured otherwise.
pub const REV_TRUNCATE: NonZeroU8 = match NonZeroU8::new(20) {
	Some(capacity) => capacity,
	None => unreachable!(),
};

/// A fixed-size revision record produced by the content store.
///
/// The namespace never looks inside a revision, it only keeps it and copies its bytes
/// verbatim into snapshots.
pub trait Revision: Sized {
	/// Encoded size in bytes, identical for every revision of this type.
	const SIZE: usize;

	/// Writes the revision into `out`, which is exactly [`Self::SIZE`] bytes long.
	fn write_bytes(&self, out: &mut [u8]);

	/// Rebuilds a revision from exactly [`Self::SIZE`] bytes.
	fn from_bytes(bytes: &[u8]) -> Self;
}

/// Opaque revision blob of `N` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawRevision<const N: usize>(pub [u8; N]);

impl<const N: usize> Revision for RawRevision<N> {
	const SIZE: usize = N;

	fn write_bytes(&self, out: &mut [u8]) {
		out.copy_from_slice(&self.0);
	}

	fn from_bytes(bytes: &[u8]) -> Self {
		let mut raw = [0; N];
		raw.copy_from_slice(bytes);
		Self(raw)
	}
}

impl<const N: usize> Default for RawRevision<N> {
	fn default() -> Self {
		Self([0; N])
	}
}

impl<const N: usize> fmt::Debug for RawRevision<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RawRevision<")?;
		for byte in self.0.iter().take(8) {
			write!(f, "{byte:02x}")?;
		}
		if N > 8 {
			write!(f, "..")?;
		}
		write!(f, ">")
	}
}

/// Bounded per-file revision history.
///
/// Holds at most `capacity` revisions; appending to a full log overwrites the oldest one.
/// `entries` is physically a ring: once `full` is set, the oldest revision sits at
/// `cursor` and the chronological order starts there.
///
/// Equality compares capacity and chronological contents, not where the ring wrapped.
#[derive(Debug, Clone)]
pub struct RevisionLog<R> {
	capacity: NonZeroU8,
	entries: Vec<R>,
	/// Slot the next append writes to.
	cursor: usize,
	full: bool,
}

impl<R> RevisionLog<R> {
	#[must_use]
	pub fn new(capacity: NonZeroU8) -> Self {
		Self {
			capacity,
			entries: Vec::with_capacity(usize::from(capacity.get())),
			cursor: 0,
			full: false,
		}
	}

	#[must_use]
	pub const fn capacity(&self) -> NonZeroU8 {
		self.capacity
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	#[must_use]
	pub const fn is_full(&self) -> bool {
		self.full
	}

	/// Records a new revision, handing back the oldest one if it had to be evicted.
	pub fn append(&mut self, revision: R) -> Option<R> {
		let capacity = usize::from(self.capacity.get());

		let evicted = if self.full {
			Some(std::mem::replace(&mut self.entries[self.cursor], revision))
		} else {
			self.entries.push(revision);
			self.full = self.entries.len() == capacity;
			None
		};

		self.cursor = (self.cursor + 1) % capacity;
		evicted
	}

	/// Slot holding the most recent revision, `None` while the log is empty.
	#[must_use]
	pub fn head(&self) -> Option<usize> {
		if self.is_empty() {
			return None;
		}

		let capacity = usize::from(self.capacity.get());
		Some((self.cursor + capacity - 1) % capacity)
	}

	#[must_use]
	pub fn latest(&self) -> Option<&R> {
		self.head().map(|head| &self.entries[head])
	}

	/// Revisions from oldest to newest, regardless of where the ring wrapped.
	pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &R> + '_ {
		let (older, newer) = if self.full {
			let (newer, older) = self.entries.split_at(self.cursor);
			(older, newer)
		} else {
			(self.entries.as_slice(), &[][..])
		};

		older.iter().chain(newer)
	}

	pub fn clear(&mut self) {
		self.entries.clear();
		self.cursor = 0;
		self.full = false;
	}
}

impl<R: PartialEq> PartialEq for RevisionLog<R> {
	fn eq(&self, other: &Self) -> bool {
		self.capacity == other.capacity
			&& self.len() == other.len()
			&& self.chronological().eq(other.chronological())
	}
}

impl<R: Eq> Eq for RevisionLog<R> {}

impl<R> Default for RevisionLog<R> {
	fn default() -> Self {
		Self::new(REV_TRUNCATE)
	}
}
