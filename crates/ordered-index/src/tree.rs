use std::fmt;

use tracing::trace;

use super::{
	error::DuplicateKeyError,
	iter::{Iter, Keys, Values},
	node::{child_slot, Node, NodeId, Order},
	Key,
};

/// Balanced multiway search tree mapping [`Key`]s to owned values.
///
/// Records live only in leaves and every leaf links to its right neighbour, so a full
/// scan in key order walks the leaf chain instead of descending the tree again for
/// each record.
///
/// Nodes are kept in an arena and addressed by index; slots freed by merges are reused
/// by later splits.
pub struct OrderedIndex<V> {
	slots: Vec<Option<Node<V>>>,
	vacant: Vec<NodeId>,
	root: Option<NodeId>,
	order: Order,
	len: usize,
}

impl<V> OrderedIndex<V> {
	#[must_use]
	pub const fn new() -> Self {
		Self::with_order(Order::DEFAULT)
	}

	#[must_use]
	pub const fn with_order(order: Order) -> Self {
		Self {
			slots: Vec::new(),
			vacant: Vec::new(),
			root: None,
			order,
			len: 0,
		}
	}

	#[must_use]
	pub const fn order(&self) -> Order {
		self.order
	}

	#[must_use]
	pub const fn len(&self) -> usize {
		self.len
	}

	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of levels between the root and the leaves, inclusive. Zero for an empty index.
	#[must_use]
	pub fn depth(&self) -> usize {
		let mut depth = 0;
		let mut cursor = self.root;
		while let Some(id) = cursor {
			depth += 1;
			cursor = match self.node(id) {
				Node::Internal { children, .. } => children.first().copied(),
				Node::Leaf { .. } => None,
			};
		}
		depth
	}

	pub fn clear(&mut self) {
		self.slots.clear();
		self.vacant.clear();
		self.root = None;
		self.len = 0;
	}

	#[must_use]
	pub fn contains_key(&self, key: Key) -> bool {
		self.locate(key).is_some()
	}

	#[must_use]
	pub fn get(&self, key: Key) -> Option<&V> {
		let (id, pos) = self.locate(key)?;
		match self.node(id) {
			Node::Leaf { values, .. } => values.get(pos),
			Node::Internal { .. } => None,
		}
	}

	pub fn get_mut(&mut self, key: Key) -> Option<&mut V> {
		let (id, pos) = self.locate(key)?;
		match self.node_mut(id) {
			Node::Leaf { values, .. } => values.get_mut(pos),
			Node::Internal { .. } => None,
		}
	}

	/// Inserts a new record, failing if `key` is already taken.
	///
	/// The existing record is left untouched on failure.
	pub fn insert(&mut self, key: Key, value: V) -> Result<(), DuplicateKeyError> {
		if self.contains_key(key) {
			return Err(DuplicateKeyError(key));
		}

		self.insert_absent(key, value);
		Ok(())
	}

	/// Returns the record under `key`, creating it with `make` when absent.
	pub fn get_or_insert_with(&mut self, key: Key, make: impl FnOnce() -> V) -> &mut V {
		let (id, pos) = if let Some(found) = self.locate(key) {
			found
		} else {
			self.insert_absent(key, make())
		};

		match self.node_mut(id) {
			Node::Leaf { values, .. } => &mut values[pos],
			Node::Internal { .. } => unreachable!("records are only stored in leaves"),
		}
	}

	/// Removes and returns the record under `key`, rebalancing the tree if needed.
	pub fn remove(&mut self, key: Key) -> Option<V> {
		let root = self.root?;
		let value = self.remove_from(root, key)?;
		self.len -= 1;
		self.collapse_root(root);

		Some(value)
	}

	/// Lazy scan over every record in ascending key order, following the leaf chain.
	#[must_use]
	pub fn iter(&self) -> Iter<'_, V> {
		Iter::new(self, self.leftmost_leaf(), self.len)
	}

	#[must_use]
	pub fn keys(&self) -> Keys<'_, V> {
		Keys::new(self.iter())
	}

	#[must_use]
	pub fn values(&self) -> Values<'_, V> {
		Values::new(self.iter())
	}

	pub(crate) fn node(&self, id: NodeId) -> &Node<V> {
		self.slots[id.0]
			.as_ref()
			.expect("ordered index node was released while still referenced")
	}

	fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
		self.slots[id.0]
			.as_mut()
			.expect("ordered index node was released while still referenced")
	}

	/// Mutable access to two distinct nodes at once.
	fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut Node<V>, &mut Node<V>) {
		assert_ne!(a, b, "cannot borrow the same node twice");

		let (low, high) = if a.0 < b.0 { (a, b) } else { (b, a) };
		let (head, tail) = self.slots.split_at_mut(high.0);
		let (Some(low_node), Some(high_node)) = (head[low.0].as_mut(), tail[0].as_mut()) else {
			unreachable!("ordered index node was released while still referenced");
		};

		if a.0 < b.0 {
			(low_node, high_node)
		} else {
			(high_node, low_node)
		}
	}

	fn alloc(&mut self, node: Node<V>) -> NodeId {
		if let Some(id) = self.vacant.pop() {
			self.slots[id.0] = Some(node);
			id
		} else {
			self.slots.push(Some(node));
			NodeId(self.slots.len() - 1)
		}
	}

	fn release(&mut self, id: NodeId) -> Node<V> {
		let node = self.slots[id.0]
			.take()
			.expect("ordered index node released twice");
		self.vacant.push(id);
		node
	}

	pub(crate) fn leftmost_leaf(&self) -> Option<NodeId> {
		let mut id = self.root?;
		loop {
			match self.node(id) {
				Node::Leaf { .. } => return Some(id),
				Node::Internal { children, .. } => id = children[0],
			}
		}
	}

	/// Leaf holding `key` and the record's position inside it.
	fn locate(&self, key: Key) -> Option<(NodeId, usize)> {
		let mut id = self.root?;
		loop {
			match self.node(id) {
				Node::Internal { keys, children } => id = children[child_slot(keys, key)],
				Node::Leaf { keys, .. } => {
					return keys.binary_search(&key).ok().map(|pos| (id, pos));
				}
			}
		}
	}

	/// Inserts a key known to be absent, returning the leaf and position it landed at.
	fn insert_absent(&mut self, key: Key, value: V) -> (NodeId, usize) {
		self.len += 1;

		let Some(root) = self.root else {
			let leaf = self.alloc(Node::Leaf {
				keys: vec![key],
				values: vec![value],
				next: None,
			});
			self.root = Some(leaf);
			return (leaf, 0);
		};

		let (landed, split) = self.insert_into(root, key, value);
		if let Some((separator, sibling)) = split {
			let new_root = self.alloc(Node::Internal {
				keys: vec![separator],
				children: vec![root, sibling],
			});
			self.root = Some(new_root);
			trace!(separator, depth = self.depth(), "Ordered index grew a new root");
		}

		landed
	}

	/// Inserts below `id`.
	///
	/// Returns where the record landed, plus the separator and new right sibling when
	/// `id` split.
	fn insert_into(
		&mut self,
		id: NodeId,
		key: Key,
		value: V,
	) -> ((NodeId, usize), Option<(Key, NodeId)>) {
		let child = match self.node(id) {
			Node::Internal { keys, children } => Some(children[child_slot(keys, key)]),
			Node::Leaf { .. } => None,
		};

		if let Some(child) = child {
			let (landed, split) = self.insert_into(child, key, value);
			let split = split.and_then(|(separator, sibling)| {
				self.insert_separator(id, separator, sibling)
			});
			(landed, split)
		} else {
			self.insert_into_leaf(id, key, value)
		}
	}

	fn insert_into_leaf(
		&mut self,
		id: NodeId,
		key: Key,
		value: V,
	) -> ((NodeId, usize), Option<(Key, NodeId)>) {
		let max_keys = self.order.max_keys();

		let Node::Leaf { keys, values, next } = self.node_mut(id) else {
			unreachable!("leaf insertion reached an internal node");
		};

		let pos = keys.partition_point(|probe| *probe < key);
		keys.insert(pos, key);
		values.insert(pos, value);

		if keys.len() <= max_keys {
			return ((id, pos), None);
		}

		let mid = keys.len() / 2;
		let right_keys = keys.split_off(mid);
		let separator = right_keys[0];
		let sibling = Node::Leaf {
			keys: right_keys,
			values: values.split_off(mid),
			next: next.take(),
		};

		let sibling = self.alloc(sibling);
		if let Node::Leaf { next, .. } = self.node_mut(id) {
			*next = Some(sibling);
		}

		trace!(separator, "Split ordered index leaf");

		let landed = if pos < mid {
			(id, pos)
		} else {
			(sibling, pos - mid)
		};

		(landed, Some((separator, sibling)))
	}

	fn insert_separator(
		&mut self,
		id: NodeId,
		separator: Key,
		right: NodeId,
	) -> Option<(Key, NodeId)> {
		let max_keys = self.order.max_keys();

		let Node::Internal { keys, children } = self.node_mut(id) else {
			unreachable!("separator insertion reached a leaf");
		};

		let slot = child_slot(keys, separator);
		keys.insert(slot, separator);
		children.insert(slot + 1, right);

		if keys.len() <= max_keys {
			return None;
		}

		let mid = keys.len() / 2;
		let right_keys = keys.split_off(mid + 1);
		let promoted = keys[mid];
		keys.truncate(mid);
		let right_children = children.split_off(mid + 1);

		let sibling = self.alloc(Node::Internal {
			keys: right_keys,
			children: right_children,
		});

		trace!(promoted, "Split ordered index internal node");

		Some((promoted, sibling))
	}

	fn remove_from(&mut self, id: NodeId, key: Key) -> Option<V> {
		let (slot, child) = match self.node_mut(id) {
			Node::Leaf { keys, values, .. } => {
				let pos = keys.binary_search(&key).ok()?;
				keys.remove(pos);
				return Some(values.remove(pos));
			}
			Node::Internal { keys, children } => {
				let slot = child_slot(keys, key);
				(slot, children[slot])
			}
		};

		let value = self.remove_from(child, key)?;

		if self.node(child).key_count() < self.order.min_keys() {
			self.rebalance(id, slot);
		}

		Some(value)
	}

	/// Restores occupancy of the child at `slot` of `parent` after it underflowed.
	fn rebalance(&mut self, parent: NodeId, slot: usize) {
		let min_keys = self.order.min_keys();

		let (left, right) = match self.node(parent) {
			Node::Internal { children, .. } => (
				slot.checked_sub(1).map(|left_slot| children[left_slot]),
				children.get(slot + 1).copied(),
			),
			Node::Leaf { .. } => unreachable!("a leaf has no children to rebalance"),
		};

		if let Some(left) = left.filter(|left| self.node(*left).key_count() > min_keys) {
			self.borrow_from_left(parent, slot, left);
		} else if let Some(right) = right.filter(|right| self.node(*right).key_count() > min_keys)
		{
			self.borrow_from_right(parent, slot, right);
		} else if left.is_some() {
			self.merge_children(parent, slot - 1);
		} else {
			self.merge_children(parent, slot);
		}
	}

	fn separator(&self, parent: NodeId, slot: usize) -> Key {
		self.node(parent).keys()[slot]
	}

	fn set_separator(&mut self, parent: NodeId, slot: usize, separator: Key) {
		if let Node::Internal { keys, .. } = self.node_mut(parent) {
			keys[slot] = separator;
		}
	}

	fn child(&self, parent: NodeId, slot: usize) -> NodeId {
		match self.node(parent) {
			Node::Internal { children, .. } => children[slot],
			Node::Leaf { .. } => unreachable!("a leaf has no children"),
		}
	}

	fn borrow_from_left(&mut self, parent: NodeId, slot: usize, left: NodeId) {
		let child = self.child(parent, slot);
		let old_separator = self.separator(parent, slot - 1);

		let new_separator = match self.pair_mut(left, child) {
			(
				Node::Leaf {
					keys: donor_keys,
					values: donor_values,
					..
				},
				Node::Leaf { keys, values, .. },
			) => {
				let (Some(key), Some(value)) = (donor_keys.pop(), donor_values.pop()) else {
					unreachable!("donor leaf had spare records");
				};
				keys.insert(0, key);
				values.insert(0, value);
				key
			}
			(
				Node::Internal {
					keys: donor_keys,
					children: donor_children,
				},
				Node::Internal { keys, children },
			) => {
				let (Some(key), Some(grandchild)) = (donor_keys.pop(), donor_children.pop()) else {
					unreachable!("donor node had spare keys");
				};
				keys.insert(0, old_separator);
				children.insert(0, grandchild);
				key
			}
			_ => unreachable!("siblings must sit at the same depth"),
		};

		self.set_separator(parent, slot - 1, new_separator);
		trace!(new_separator, "Rotated a record in from the left sibling");
	}

	fn borrow_from_right(&mut self, parent: NodeId, slot: usize, right: NodeId) {
		let child = self.child(parent, slot);
		let old_separator = self.separator(parent, slot);

		let new_separator = match self.pair_mut(right, child) {
			(
				Node::Leaf {
					keys: donor_keys,
					values: donor_values,
					..
				},
				Node::Leaf { keys, values, .. },
			) => {
				keys.push(donor_keys.remove(0));
				values.push(donor_values.remove(0));
				donor_keys[0]
			}
			(
				Node::Internal {
					keys: donor_keys,
					children: donor_children,
				},
				Node::Internal { keys, children },
			) => {
				keys.push(old_separator);
				children.push(donor_children.remove(0));
				donor_keys.remove(0)
			}
			_ => unreachable!("siblings must sit at the same depth"),
		};

		self.set_separator(parent, slot, new_separator);
		trace!(new_separator, "Rotated a record in from the right sibling");
	}

	/// Folds the child at `left_slot + 1` into the child at `left_slot`.
	fn merge_children(&mut self, parent: NodeId, left_slot: usize) {
		let (left, right, separator) = match self.node_mut(parent) {
			Node::Internal { keys, children } => (
				children[left_slot],
				children.remove(left_slot + 1),
				keys.remove(left_slot),
			),
			Node::Leaf { .. } => unreachable!("a leaf has no children to merge"),
		};

		let absorbed = self.release(right);

		match (self.node_mut(left), absorbed) {
			(
				Node::Leaf { keys, values, next },
				Node::Leaf {
					keys: right_keys,
					values: right_values,
					next: right_next,
				},
			) => {
				keys.extend(right_keys);
				values.extend(right_values);
				*next = right_next;
			}
			(
				Node::Internal { keys, children },
				Node::Internal {
					keys: right_keys,
					children: right_children,
				},
			) => {
				keys.push(separator);
				keys.extend(right_keys);
				children.extend(right_children);
			}
			_ => unreachable!("siblings must sit at the same depth"),
		}

		trace!(separator, "Merged ordered index siblings");
	}

	/// Drops a root left without keys after a removal.
	fn collapse_root(&mut self, root: NodeId) {
		let replacement = match self.node(root) {
			Node::Leaf { keys, .. } if keys.is_empty() => None,
			Node::Internal { keys, children } if keys.is_empty() => Some(children[0]),
			_ => return,
		};

		self.release(root);
		self.root = replacement;

		if replacement.is_none() {
			// Nothing references the arena anymore
			self.slots.clear();
			self.vacant.clear();
		} else {
			trace!(depth = self.depth(), "Ordered index root collapsed");
		}
	}
}

impl<V> Default for OrderedIndex<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V: fmt::Debug> fmt::Debug for OrderedIndex<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

/// Two indexes are equal when they hold the same records, whatever their node layout.
impl<V: PartialEq> PartialEq for OrderedIndex<V> {
	fn eq(&self, other: &Self) -> bool {
		self.len == other.len && self.iter().eq(other.iter())
	}
}

impl<V: Eq> Eq for OrderedIndex<V> {}

impl<'a, V> IntoIterator for &'a OrderedIndex<V> {
	type Item = (Key, &'a V);
	type IntoIter = Iter<'a, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
impl<V> OrderedIndex<V> {
	/// Walks the whole tree checking ordering, occupancy and the leaf chain.
	fn assert_invariants(&self) {
		let Some(root) = self.root else {
			assert_eq!(self.len, 0);
			return;
		};

		let mut leaves = Vec::new();
		self.check_subtree(root, None, None, true, &mut leaves);

		let depths = leaves.iter().map(|(_, depth)| *depth).collect::<Vec<_>>();
		assert!(
			depths.windows(2).all(|pair| pair[0] == pair[1]),
			"leaves at uneven depths: {depths:?}"
		);

		// The leaf chain must visit exactly the leaves found by descent, left to right
		let mut chained = Vec::new();
		let mut cursor = self.leftmost_leaf();
		while let Some(id) = cursor {
			chained.push(id);
			cursor = match self.node(id) {
				Node::Leaf { next, .. } => *next,
				Node::Internal { .. } => panic!("leaf chain reached an internal node"),
			};
		}
		assert_eq!(
			chained,
			leaves.iter().map(|(id, _)| *id).collect::<Vec<_>>()
		);

		let keys = self.keys().collect::<Vec<_>>();
		assert_eq!(keys.len(), self.len);
		assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));

		let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
		assert_eq!(occupied + self.vacant.len(), self.slots.len());
	}

	fn check_subtree(
		&self,
		id: NodeId,
		lower: Option<Key>,
		upper: Option<Key>,
		is_root: bool,
		leaves: &mut Vec<(NodeId, usize)>,
	) {
		let node = self.node(id);
		let keys = node.keys();

		assert!(keys.len() <= self.order.max_keys(), "node over capacity");
		if !is_root {
			assert!(keys.len() >= self.order.min_keys(), "node under capacity");
		}
		assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
		assert!(keys
			.iter()
			.all(|key| lower.map_or(true, |lower| *key >= lower)
				&& upper.map_or(true, |upper| *key < upper)));

		match node {
			Node::Leaf { keys, values, .. } => {
				assert_eq!(keys.len(), values.len());
				leaves.push((id, 0));
			}
			Node::Internal { keys, children } => {
				assert_eq!(children.len(), keys.len() + 1);
				let before = leaves.len();
				for (slot, child) in children.iter().enumerate() {
					let lower = if slot == 0 { lower } else { Some(keys[slot - 1]) };
					let upper = keys.get(slot).copied().or(upper);
					self.check_subtree(*child, lower, upper, false, leaves);
				}
				for (_, depth) in &mut leaves[before..] {
					*depth += 1;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use rand::{seq::SliceRandom, Rng, SeedableRng};

	use super::*;

	fn order(order: usize) -> Order {
		Order::new(order).unwrap()
	}

	#[test]
	fn empty_index() {
		let index = OrderedIndex::<u32>::new();
		assert!(index.is_empty());
		assert_eq!(index.depth(), 0);
		assert_eq!(index.get(1), None);
		assert_eq!(index.iter().next(), None);
		index.assert_invariants();
	}

	#[test]
	fn duplicate_key_is_rejected_and_existing_value_kept() {
		let mut index = OrderedIndex::new();
		index.insert(7, "first").unwrap();

		assert_eq!(index.insert(7, "second"), Err(DuplicateKeyError(7)));
		assert_eq!(index.get(7), Some(&"first"));
		assert_eq!(index.len(), 1);
	}

	#[test]
	fn ascending_inserts_split_and_chain_leaves() {
		let mut index = OrderedIndex::with_order(order(3));
		for key in 0..100 {
			index.insert(key, u32::from(key) * 10).unwrap();
			index.assert_invariants();
		}

		assert!(index.depth() > 3);
		assert_eq!(index.keys().collect::<Vec<_>>(), (0..100).collect::<Vec<_>>());
		assert_eq!(index.get(42), Some(&420));
	}

	#[test]
	fn descending_inserts_keep_order() {
		let mut index = OrderedIndex::with_order(order(4));
		for key in (0..64).rev() {
			index.insert(key, ()).unwrap();
		}

		index.assert_invariants();
		assert_eq!(index.iter().len(), 64);
		assert_eq!(index.keys().next(), Some(0));
		assert_eq!(index.keys().last(), Some(63));
	}

	#[test]
	fn get_or_insert_with_creates_once() {
		let mut index = OrderedIndex::new();

		*index.get_or_insert_with(3, || 1) += 1;
		*index.get_or_insert_with(3, || 100) += 1;

		assert_eq!(index.get(3), Some(&3));
		assert_eq!(index.len(), 1);
	}

	#[test]
	fn get_or_insert_with_hands_back_the_new_record_across_splits() {
		let mut rng = rand::rngs::StdRng::seed_from_u64(11);
		let mut keys = (0..200).collect::<Vec<Key>>();
		keys.shuffle(&mut rng);

		let mut index = OrderedIndex::with_order(order(3));
		for &key in &keys {
			let value = index.get_or_insert_with(key, || u32::MAX);
			assert_eq!(*value, u32::MAX);
			*value = u32::from(key) * 10;
			index.assert_invariants();
		}

		assert!(index.iter().all(|(key, value)| *value == u32::from(key) * 10));
	}

	#[test]
	fn remove_until_empty() {
		let mut index = OrderedIndex::with_order(order(3));
		for key in 0..50 {
			index.insert(key, key).unwrap();
		}

		for key in (0..50).step_by(2) {
			assert_eq!(index.remove(key), Some(key));
			index.assert_invariants();
		}
		assert_eq!(index.remove(0), None);

		for key in (1..50).step_by(2) {
			assert_eq!(index.remove(key), Some(key));
			index.assert_invariants();
		}

		assert!(index.is_empty());
		assert_eq!(index.depth(), 0);
		assert!(index.slots.is_empty());
	}

	#[test]
	fn freed_slots_are_reused() {
		let mut index = OrderedIndex::with_order(order(3));
		for key in 0..30 {
			index.insert(key, ()).unwrap();
		}
		for key in 0..20 {
			index.remove(key);
		}
		let arena_size = index.slots.len();

		for key in 0..20 {
			index.insert(key, ()).unwrap();
		}

		index.assert_invariants();
		assert!(index.slots.len() <= arena_size + 2);
	}

	#[test]
	fn randomized_against_btree_map() {
		let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);

		for order in [3, 4, 5, 8, 16] {
			let mut index = OrderedIndex::with_order(Order::new(order).unwrap());
			let mut model = BTreeMap::new();

			for _ in 0..2_000 {
				let key = rng.gen_range(0..512);
				if rng.gen_bool(0.6) {
					let inserted = index.insert(key, u32::from(key)).is_ok();
					assert_eq!(inserted, model.insert(key, u32::from(key)).is_none());
				} else {
					assert_eq!(index.remove(key), model.remove(&key));
				}
			}

			index.assert_invariants();
			assert_eq!(
				index.iter().map(|(key, value)| (key, *value)).collect::<Vec<_>>(),
				model.into_iter().collect::<Vec<_>>()
			);
		}
	}

	#[test]
	fn shuffled_removal_keeps_balance() {
		let mut rng = rand::rngs::StdRng::seed_from_u64(7);
		let mut keys = (0..300).collect::<Vec<Key>>();
		keys.shuffle(&mut rng);

		let mut index = OrderedIndex::with_order(order(5));
		for key in &keys {
			index.insert(*key, *key).unwrap();
		}

		keys.shuffle(&mut rng);
		for (removed, key) in keys.iter().enumerate() {
			assert_eq!(index.remove(*key), Some(*key));
			assert_eq!(index.len(), 300 - removed - 1);
			if removed % 25 == 0 {
				index.assert_invariants();
			}
		}
		assert!(index.is_empty());
	}

	#[test]
	fn equality_ignores_layout() {
		let mut narrow = OrderedIndex::with_order(order(3));
		let mut wide = OrderedIndex::with_order(order(32));
		for key in 0..40 {
			narrow.insert(key, key).unwrap();
			wide.insert(39 - key, 39 - key).unwrap();
		}

		assert_ne!(narrow.depth(), wide.depth());
		assert_eq!(narrow, wide);

		wide.remove(5);
		assert_ne!(narrow, wide);
	}

	#[test]
	fn clear_resets_everything() {
		let mut index = OrderedIndex::new();
		for key in 0..10 {
			index.insert(key, key).unwrap();
		}
		index.clear();

		assert!(index.is_empty());
		assert_eq!(index.get(3), None);
		index.insert(3, 3).unwrap();
		index.assert_invariants();
	}
}
