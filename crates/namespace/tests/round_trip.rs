use revfs_namespace::{
	dump, load, load_snapshot, save_snapshot, Namespace, NamespaceConfig, Order, RawRevision,
	Revision,
};

use std::num::NonZeroU8;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tempfile::tempdir;
use tracing_test::traced_test;

/// Revision stand-in carrying a sequence number, like a content-store record would carry
/// a chunk reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Commit(u32);

impl Revision for Commit {
	const SIZE: usize = 4;

	fn write_bytes(&self, out: &mut [u8]) {
		out.copy_from_slice(&self.0.to_be_bytes());
	}

	fn from_bytes(bytes: &[u8]) -> Self {
		let mut raw = [0; 4];
		raw.copy_from_slice(bytes);
		Self(u32::from_be_bytes(raw))
	}
}

fn encode<R: Revision>(namespace: &Namespace<R>) -> Vec<u8> {
	let mut out = Vec::new();
	dump(namespace, &mut out).unwrap();
	out
}

fn decode<R: Revision>(bytes: &[u8], config: NamespaceConfig) -> Namespace<R> {
	let mut input = bytes;
	let namespace = load(&mut input, config).unwrap();
	assert!(input.is_empty(), "{} bytes left unread", input.len());
	namespace
}

fn history(namespace: &Namespace<Commit>, dir: u16, file: u16) -> Vec<u32> {
	namespace
		.file(dir, file)
		.unwrap()
		.history()
		.chronological()
		.map(|commit| commit.0)
		.collect()
}

fn small_config() -> NamespaceConfig {
	NamespaceConfig {
		index_order: Order::new(3).unwrap(),
		revision_capacity: NonZeroU8::new(20).unwrap(),
	}
}

fn random_namespace(rng: &mut StdRng, config: NamespaceConfig) -> Namespace<Commit> {
	let mut namespace = Namespace::with_config(config);
	let mut sequence = 0;

	for _ in 0..rng.gen_range(1..40) {
		let dir = rng.gen_range(0..200);
		namespace
			.resolve_directory(dir, format!("dir-{dir}").as_bytes())
			.unwrap();

		for _ in 0..rng.gen_range(0..12) {
			let file = rng.gen_range(0..500);
			namespace
				.resolve_file(dir, file, format!("file-{file}.bin").as_bytes())
				.unwrap();

			for _ in 0..rng.gen_range(0..30) {
				namespace.append_revision(dir, file, Commit(sequence)).unwrap();
				sequence += 1;
			}
		}
	}

	namespace
}

#[test]
#[traced_test]
fn random_namespaces_round_trip() {
	let mut rng = StdRng::seed_from_u64(0xfeed);

	for _ in 0..50 {
		let namespace = random_namespace(&mut rng, small_config());
		let bytes = encode(&namespace);
		let restored = decode::<Commit>(&bytes, small_config());

		assert_eq!(restored, namespace);
		// Dumping a freshly loaded namespace must reproduce the stream byte for byte
		assert_eq!(encode(&restored), bytes);
	}

	assert!(logs_contain("Loaded namespace"));
}

#[test]
fn wraparound_dumps_the_newest_twenty_oldest_first() {
	let mut namespace = Namespace::with_config(small_config());
	namespace.resolve_directory(1, b"docs").unwrap();
	namespace.resolve_file(1, 1, b"log.txt").unwrap();
	for n in 0..25 {
		namespace.append_revision(1, 1, Commit(n)).unwrap();
	}

	let bytes = encode(&namespace);

	// dirCount, key, len, "docs", fileCount, key, len, "log.txt", revCount
	let header = 2 + 2 + 2 + 4 + 2 + 2 + 2 + 7;
	assert_eq!(bytes[header], 20);
	let entries = bytes[header + 1..]
		.chunks(Commit::SIZE)
		.map(|chunk| Commit::from_bytes(chunk).0)
		.collect::<Vec<_>>();
	assert_eq!(entries, (5..25).collect::<Vec<_>>());

	let restored = decode::<Commit>(&bytes, small_config());
	assert_eq!(history(&restored, 1, 1), (5..25).collect::<Vec<_>>());
	assert!(restored.file(1, 1).unwrap().history().is_full());
	// The restored ring starts at slot zero while the written one had wrapped
	assert_eq!(restored, namespace);
}

#[test]
fn restored_full_log_keeps_evicting_in_order() {
	let mut namespace = Namespace::with_config(small_config());
	namespace.resolve_directory(1, b"docs").unwrap();
	namespace.resolve_file(1, 1, b"log.txt").unwrap();
	for n in 0..33 {
		namespace.append_revision(1, 1, Commit(n)).unwrap();
	}

	let mut restored = decode::<Commit>(&encode(&namespace), small_config());

	assert_eq!(
		restored.append_revision(1, 1, Commit(33)).unwrap(),
		Some(Commit(13))
	);
	namespace.append_revision(1, 1, Commit(33)).unwrap();
	assert_eq!(history(&restored, 1, 1), history(&namespace, 1, 1));
	assert_eq!(history(&restored, 1, 1), (14..34).collect::<Vec<_>>());
}

#[test]
fn empty_history_round_trips_as_zero_revisions() {
	let mut namespace = Namespace::<Commit>::new();
	namespace.resolve_directory(4, b"empty").unwrap();
	namespace.resolve_file(4, 2, b"untouched").unwrap();

	let bytes = encode(&namespace);
	assert_eq!(bytes.last(), Some(&0));

	let restored = decode::<Commit>(&bytes, NamespaceConfig::default());
	let history = restored.file(4, 2).unwrap().history();
	assert!(history.is_empty());
	assert_eq!(history.head(), None);
}

#[test]
fn empty_namespace_round_trips() {
	let namespace = Namespace::<Commit>::new();
	let bytes = encode(&namespace);

	assert_eq!(bytes, [0, 0]);
	assert!(decode::<Commit>(&bytes, NamespaceConfig::default()).is_empty());
}

#[test]
fn counts_cover_every_leaf() {
	// Order 3 keeps at most two records per leaf, so both levels span many leaves
	let mut namespace: Namespace<Commit> = Namespace::with_config(small_config());
	for dir in (0..300).rev() {
		namespace.resolve_directory(dir, b"d").unwrap();
	}
	for file in 0..100 {
		namespace.resolve_file(150, file * 3, b"f").unwrap();
	}

	let bytes = encode(&namespace);
	assert_eq!(&bytes[..2], &300_u16.to_le_bytes());

	let restored = decode::<Commit>(&bytes, small_config());
	assert_eq!(restored.len(), 300);
	assert_eq!(restored.directory(150).unwrap().file_count(), 100);

	let keys = restored.directories().map(|(key, _)| key).collect::<Vec<_>>();
	assert_eq!(keys, (0..300).collect::<Vec<_>>());
	let file_keys = restored
		.directory(150)
		.unwrap()
		.files()
		.map(|(key, _)| key)
		.collect::<Vec<_>>();
	assert!(file_keys.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn docs_and_src_scenario() {
	type Blob = RawRevision<2>;

	let mut namespace = Namespace::<Blob>::new();
	namespace.resolve_directory(1, b"docs").unwrap();
	namespace.resolve_directory(2, b"src").unwrap();
	namespace.resolve_file(1, 1, b"a.txt").unwrap();
	for blob in [*b"b0", *b"b1", *b"b2"] {
		namespace.append_revision(1, 1, RawRevision(blob)).unwrap();
	}

	let bytes = encode(&namespace);
	let parts: [&[u8]; 14] = [
		&2_u16.to_le_bytes(),
		&1_u16.to_le_bytes(),
		&4_u16.to_le_bytes(),
		b"docs",
		&1_u16.to_le_bytes(),
		&1_u16.to_le_bytes(),
		&5_u16.to_le_bytes(),
		b"a.txt",
		&[3],
		b"b0b1b2",
		&2_u16.to_le_bytes(),
		&3_u16.to_le_bytes(),
		b"src",
		&0_u16.to_le_bytes(),
	];
	assert_eq!(bytes, parts.concat());

	let restored = decode::<Blob>(&bytes, NamespaceConfig::default());
	assert_eq!(restored, namespace);
	assert_eq!(restored.directory(2).unwrap().file_count(), 0);
}

#[test]
#[traced_test]
fn smaller_capacity_keeps_the_newest_revisions() {
	let mut namespace = Namespace::with_config(small_config());
	namespace.resolve_directory(1, b"docs").unwrap();
	namespace.resolve_file(1, 1, b"a.txt").unwrap();
	for n in 0..12 {
		namespace.append_revision(1, 1, Commit(n)).unwrap();
	}

	let narrow = NamespaceConfig {
		revision_capacity: NonZeroU8::new(5).unwrap(),
		..small_config()
	};
	let restored = decode::<Commit>(&encode(&namespace), narrow);

	assert_eq!(history(&restored, 1, 1), (7..12).collect::<Vec<_>>());
	assert!(logs_contain("keeping the newest"));
}

#[test]
#[traced_test]
fn snapshot_file_round_trip() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("namespace.snapshot");
	let mut rng = StdRng::seed_from_u64(3);

	let namespace = random_namespace(&mut rng, NamespaceConfig::default());
	save_snapshot(&namespace, &path).unwrap();

	let restored = load_snapshot::<Commit>(&path, NamespaceConfig::default()).unwrap();
	assert_eq!(restored, namespace);
	assert_eq!(std::fs::read(&path).unwrap(), encode(&namespace));

	assert!(logs_contain("Saved namespace snapshot"));
	assert!(logs_contain("Loaded namespace snapshot"));
}
