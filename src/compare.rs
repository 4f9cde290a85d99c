//! Key orderings for [`FlatMap`](`crate::FlatMap`).

use core::cmp::Ordering;

/// A strict weak order over `K`.
///
/// Two keys are *equivalent* iff neither is [`less`](`Compare::less`) than the other.
/// [`FlatMap`](`crate::FlatMap`) treats equivalent keys as duplicates.
pub trait Compare<K: ?Sized> {
	/// Whether `lhs` is ordered strictly before `rhs`.
	fn less(&self, lhs: &K, rhs: &K) -> bool;

	/// Whether neither key is ordered before the other.
	fn equivalent(&self, lhs: &K, rhs: &K) -> bool {
		!self.less(lhs, rhs) && !self.less(rhs, lhs)
	}

	/// This order as [`Ordering`], for use with the standard library's sorting functions.
	fn ordering(&self, lhs: &K, rhs: &K) -> Ordering {
		if self.less(lhs, rhs) {
			Ordering::Less
		} else if self.less(rhs, lhs) {
			Ordering::Greater
		} else {
			Ordering::Equal
		}
	}
}

/// Ascending order by [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Less;

impl<K: ?Sized + Ord> Compare<K> for Less {
	fn less(&self, lhs: &K, rhs: &K) -> bool {
		lhs < rhs
	}

	fn ordering(&self, lhs: &K, rhs: &K) -> Ordering {
		lhs.cmp(rhs)
	}
}

/// Descending order by [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Greater;

impl<K: ?Sized + Ord> Compare<K> for Greater {
	fn less(&self, lhs: &K, rhs: &K) -> bool {
		lhs > rhs
	}

	fn ordering(&self, lhs: &K, rhs: &K) -> Ordering {
		rhs.cmp(lhs)
	}
}

/// Any `Fn(&K, &K) -> bool` "less than" predicate.
impl<K: ?Sized, F> Compare<K> for F
where
	F: Fn(&K, &K) -> bool,
{
	fn less(&self, lhs: &K, rhs: &K) -> bool {
		self(lhs, rhs)
	}
}
