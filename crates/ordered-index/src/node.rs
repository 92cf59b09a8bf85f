use serde::{Deserialize, Serialize};

use super::{error::InvalidOrderError, Key};

/// Branching factor of an [`OrderedIndex`](crate::OrderedIndex).
///
/// An internal node holds at most `order` children and `order - 1` separator keys, and a
/// leaf holds at most `order - 1` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Order(usize);

impl Order {
	pub const MIN: usize = 3;
	pub const DEFAULT: Self = Self(4);

	pub const fn new(order: usize) -> Result<Self, InvalidOrderError> {
		if order < Self::MIN {
			Err(InvalidOrderError(order))
		} else {
			Ok(Self(order))
		}
	}

	#[must_use]
	pub const fn get(self) -> usize {
		self.0
	}

	pub(crate) const fn max_keys(self) -> usize {
		self.0 - 1
	}

	/// Fewest keys a non-root node may carry before it gets rebalanced.
	pub(crate) const fn min_keys(self) -> usize {
		(self.0 - 1) / 2
	}
}

impl Default for Order {
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl TryFrom<usize> for Order {
	type Error = InvalidOrderError;

	fn try_from(order: usize) -> Result<Self, Self::Error> {
		Self::new(order)
	}
}

impl From<Order> for usize {
	fn from(Order(order): Order) -> Self {
		order
	}
}

/// Position of a node inside the index arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug)]
pub(crate) enum Node<V> {
	Leaf {
		keys: Vec<Key>,
		values: Vec<V>,
		/// Next leaf in ascending key order, `None` on the rightmost leaf.
		next: Option<NodeId>,
	},
	/// Every key under `children[i + 1]` is at least `keys[i]`, every key under `children[i]` is below it.
	Internal {
		keys: Vec<Key>,
		children: Vec<NodeId>,
	},
}

impl<V> Node<V> {
	pub(crate) fn keys(&self) -> &[Key] {
		match self {
			Self::Leaf { keys, .. } | Self::Internal { keys, .. } => keys,
		}
	}

	pub(crate) fn key_count(&self) -> usize {
		self.keys().len()
	}
}

/// Index of the child subtree that may contain `key`.
pub(crate) fn child_slot(separators: &[Key], key: Key) -> usize {
	separators.partition_point(|separator| *separator <= key)
}
