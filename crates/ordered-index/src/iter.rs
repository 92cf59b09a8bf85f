use std::iter::FusedIterator;

use super::{
	node::{Node, NodeId},
	Key, OrderedIndex,
};

/// Ascending scan over an [`OrderedIndex`], produced by [`OrderedIndex::iter`].
///
/// Starts at the leftmost leaf and hops along the leaf chain, never revisiting
/// internal nodes.
#[derive(Debug)]
pub struct Iter<'a, V> {
	index: &'a OrderedIndex<V>,
	leaf: Option<NodeId>,
	pos: usize,
	remaining: usize,
}

impl<'a, V> Iter<'a, V> {
	pub(crate) const fn new(
		index: &'a OrderedIndex<V>,
		leaf: Option<NodeId>,
		remaining: usize,
	) -> Self {
		Self {
			index,
			leaf,
			pos: 0,
			remaining,
		}
	}
}

impl<'a, V> Iterator for Iter<'a, V> {
	type Item = (Key, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		let index = self.index;

		loop {
			let Node::Leaf { keys, values, next } = index.node(self.leaf?) else {
				return None;
			};

			if let (Some(key), Some(value)) = (keys.get(self.pos), values.get(self.pos)) {
				self.pos += 1;
				self.remaining = self.remaining.saturating_sub(1);
				return Some((*key, value));
			}

			self.leaf = *next;
			self.pos = 0;
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
	fn clone(&self) -> Self {
		Self { ..*self }
	}
}

/// Keys of an [`OrderedIndex`] in ascending order.
#[derive(Debug)]
pub struct Keys<'a, V>(Iter<'a, V>);

impl<'a, V> Keys<'a, V> {
	pub(crate) const fn new(iter: Iter<'a, V>) -> Self {
		Self(iter)
	}
}

impl<V> Iterator for Keys<'_, V> {
	type Item = Key;

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|(key, _)| key)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

/// Values of an [`OrderedIndex`] in ascending key order.
#[derive(Debug)]
pub struct Values<'a, V>(Iter<'a, V>);

impl<'a, V> Values<'a, V> {
	pub(crate) const fn new(iter: Iter<'a, V>) -> Self {
		Self(iter)
	}
}

impl<'a, V> Iterator for Values<'a, V> {
	type Item = &'a V;

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|(_, value)| value)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}
