//! A [`Vec`]-like sequence that keeps each element in its own allocation.
//!
//! See [`MovingVec`].

use crate::{OutOfRange, ValuePtr};
use alloc::vec::{self, Vec};
use core::{
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
	iter::FusedIterator,
	ops::{Index, IndexMut, RangeBounds},
	slice,
};
use scopeguard::ScopeGuard;
use tap::Pipe;

/// A resizable sequence stored as `Vec<ValuePtr<T>>`, with a plain-[`Vec`]-like interface over `T`.
///
/// Insertions, removals and reorderings only ever shift the pointer-sized handles,
/// so they are cheap even for large `T`, and **elements never change their address** as long as they remain in the container.
///
/// ```
/// use value_ptr::MovingVec;
///
/// let mut v: MovingVec<[u8; 1024]> = MovingVec::new();
/// v.push([1; 1024]);
/// let first: *const [u8; 1024] = &v[0];
///
/// v.insert(0, [0; 1024]);
/// v.sort();
/// assert!(core::ptr::eq(first, &v[1]));
/// ```
///
/// Every slot always holds an element, so the handles are never observable as null.
/// The [`indirect`](`MovingVec::indirect`) view exposes them read-only.
pub struct MovingVec<T> {
	pub(crate) slots: Vec<ValuePtr<T>>,
}

impl<T> Default for MovingVec<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> MovingVec<T> {
	/// Creates a new, empty [`MovingVec`]. Doesn't allocate.
	#[must_use]
	pub const fn new() -> Self {
		Self { slots: Vec::new() }
	}

	/// Creates a new, empty [`MovingVec`] with room for at least `capacity` handles.
	#[must_use]
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			slots: Vec::with_capacity(capacity),
		}
	}

	/// Creates a [`MovingVec`] containing `len` clones of `value`.
	#[must_use]
	pub fn from_elem(len: usize, value: &T) -> Self
	where
		T: Clone,
	{
		core::iter::repeat_with(|| value.clone()).take(len).collect()
	}

	/// The number of elements.
	#[must_use]
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Whether there are no elements.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// How many handles fit without reallocating the handle array.
	///
	/// Each element is allocated separately regardless.
	#[must_use]
	pub fn capacity(&self) -> usize {
		self.slots.capacity()
	}

	/// Reserves room for at least `additional` more handles.
	pub fn reserve(&mut self, additional: usize) {
		self.slots.reserve(additional)
	}

	/// Shrinks the handle array as much as possible.
	pub fn shrink_to_fit(&mut self) {
		self.slots.shrink_to_fit()
	}

	/// Drops all elements.
	pub fn clear(&mut self) {
		self.slots.clear()
	}

	/// Drops all elements at and after `len`.
	pub fn truncate(&mut self, len: usize) {
		self.slots.truncate(len)
	}

	/// Appends `value`.
	pub fn push(&mut self, value: T) {
		self.slots.push(ValuePtr::new(value))
	}

	/// Appends the result of `make`, constructing it directly for its new allocation.
	///
	/// Returns a reference to the new element.
	pub fn emplace_back(&mut self, make: impl FnOnce() -> T) -> &mut T {
		let index = self.slots.len();
		self.emplace(index, make)
	}

	/// Inserts `value` at `index`, shifting the handles after it.
	///
	/// # Panics
	///
	/// Iff `index > len`.
	#[track_caller]
	pub fn insert(&mut self, index: usize, value: T) {
		self.slots.insert(index, ValuePtr::new(value))
	}

	/// Inserts the result of `make` at `index`, shifting the handles after it.
	///
	/// Returns a reference to the new element.
	///
	/// # Panics
	///
	/// Iff `index > len`, before calling `make`.
	#[track_caller]
	pub fn emplace(&mut self, index: usize, make: impl FnOnce() -> T) -> &mut T {
		self.check_insertion_index(index);
		self.slots.insert(index, ValuePtr::new(make()));
		&mut self[index]
	}

	/// Inserts all of `values` at `index`, in order.
	///
	/// If `values` panics, the elements inserted so far are dropped again and `self` is left as it was.
	///
	/// # Panics
	///
	/// Iff `index > len`, before consuming `values`.
	#[track_caller]
	pub fn insert_many(&mut self, index: usize, values: impl IntoIterator<Item = T>) {
		self.check_insertion_index(index);
		let original_len = self.slots.len();
		let mut slots = scopeguard::guard(&mut self.slots, move |slots| {
			slots.truncate(original_len)
		});
		slots.extend(values.into_iter().map(ValuePtr::new));
		let added = slots.len() - original_len;
		slots[index..].rotate_right(added);
		ScopeGuard::into_inner(slots);
	}

	/// Removes and returns the element at `index`.
	///
	/// # Panics
	///
	/// Iff `index >= len`.
	#[track_caller]
	pub fn remove(&mut self, index: usize) -> T {
		self.slots.remove(index).into_value()
	}

	/// Removes the element at `index` and returns the last element in its place.
	///
	/// # Panics
	///
	/// Iff `index >= len`.
	#[track_caller]
	pub fn swap_remove(&mut self, index: usize) -> T {
		self.slots.swap_remove(index).into_value()
	}

	/// Drops the element at `index` in place, without moving it out first.
	///
	/// # Panics
	///
	/// Iff `index >= len`.
	#[track_caller]
	pub fn erase(&mut self, index: usize) {
		drop(self.slots.remove(index))
	}

	/// Drops the elements in `range` in place.
	///
	/// # Panics
	///
	/// Iff `range` is out of bounds or decreasing.
	#[track_caller]
	pub fn erase_range(&mut self, range: impl RangeBounds<usize>) {
		self.slots.drain(range);
	}

	/// Removes and returns the last element, if any.
	pub fn pop(&mut self) -> Option<T> {
		self.slots.pop().map(ValuePtr::into_value)
	}

	/// Grows or shrinks to `len` elements, filling with clones of `value`.
	pub fn resize(&mut self, len: usize, value: &T)
	where
		T: Clone,
	{
		self.resize_with(len, || value.clone())
	}

	/// Grows or shrinks to `len` elements, filling with the results of `make`.
	pub fn resize_with(&mut self, len: usize, mut make: impl FnMut() -> T) {
		self.slots.resize_with(len, || ValuePtr::new(make()))
	}

	/// Borrows the element at `index`, if in bounds.
	#[must_use]
	pub fn get(&self, index: usize) -> Option<&T> {
		self.slots.get(index).map(|slot| &**slot)
	}

	/// Mutably borrows the element at `index`, if in bounds.
	#[must_use]
	pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		self.slots.get_mut(index).map(|slot| &mut **slot)
	}

	/// Borrows the element at `index`, or reports why not.
	///
	/// # Errors
	///
	/// [`OutOfRange::Index`] iff `index >= len`.
	pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
		let len = self.len();
		self.get(index).ok_or(OutOfRange::Index { index, len })
	}

	/// Mutably borrows the element at `index`, or reports why not.
	///
	/// # Errors
	///
	/// [`OutOfRange::Index`] iff `index >= len`.
	pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
		let len = self.len();
		self.get_mut(index).ok_or(OutOfRange::Index { index, len })
	}

	/// The first element, if any.
	#[must_use]
	pub fn first(&self) -> Option<&T> {
		self.slots.first().map(|slot| &**slot)
	}

	/// The first element, mutably, if any.
	#[must_use]
	pub fn first_mut(&mut self) -> Option<&mut T> {
		self.slots.first_mut().map(|slot| &mut **slot)
	}

	/// The last element, if any.
	#[must_use]
	pub fn last(&self) -> Option<&T> {
		self.slots.last().map(|slot| &**slot)
	}

	/// The last element, mutably, if any.
	#[must_use]
	pub fn last_mut(&mut self) -> Option<&mut T> {
		self.slots.last_mut().map(|slot| &mut **slot)
	}

	/// Iterates over the elements.
	pub fn iter(&self) -> Iter<'_, T> {
		Iter {
			slots: self.slots.iter(),
		}
	}

	/// Iterates mutably over the elements.
	pub fn iter_mut(&mut self) -> IterMut<'_, T> {
		IterMut {
			slots: self.slots.iter_mut(),
		}
	}

	/// The handles themselves, in order. None of them are null.
	#[must_use]
	pub fn indirect(&self) -> &[ValuePtr<T>] {
		&self.slots
	}

	/// Whether any element equals `value`.
	#[must_use]
	pub fn contains(&self, value: &T) -> bool
	where
		T: PartialEq,
	{
		self.iter().any(|element| element == value)
	}

	/// Swaps the elements at `a` and `b` by swapping their handles.
	///
	/// # Panics
	///
	/// Iff either index is out of bounds.
	#[track_caller]
	pub fn swap(&mut self, a: usize, b: usize) {
		self.slots.swap(a, b)
	}

	/// Reverses the order of the elements.
	pub fn reverse(&mut self) {
		self.slots.reverse()
	}

	/// Rotates the elements `mid` places to the left.
	///
	/// # Panics
	///
	/// Iff `mid > len`.
	#[track_caller]
	pub fn rotate_left(&mut self, mid: usize) {
		self.slots.rotate_left(mid)
	}

	/// Rotates the elements `k` places to the right.
	///
	/// # Panics
	///
	/// Iff `k > len`.
	#[track_caller]
	pub fn rotate_right(&mut self, k: usize) {
		self.slots.rotate_right(k)
	}

	/// Stable sort by [`Ord`]. Only the handles move.
	pub fn sort(&mut self)
	where
		T: Ord,
	{
		self.sort_by(T::cmp)
	}

	/// Stable sort by `compare`. Only the handles move.
	pub fn sort_by(&mut self, mut compare: impl FnMut(&T, &T) -> Ordering) {
		self.slots.sort_by(|a, b| compare(a, b))
	}

	/// Stable sort by a key. Only the handles move.
	pub fn sort_by_key<K: Ord>(&mut self, mut key: impl FnMut(&T) -> K) {
		self.slots.sort_by_key(|slot| key(slot))
	}

	/// Unstable sort by [`Ord`]. Only the handles move.
	pub fn sort_unstable(&mut self)
	where
		T: Ord,
	{
		self.sort_unstable_by(T::cmp)
	}

	/// Unstable sort by `compare`. Only the handles move.
	pub fn sort_unstable_by(&mut self, mut compare: impl FnMut(&T, &T) -> Ordering) {
		self.slots.sort_unstable_by(|a, b| compare(a, b))
	}

	/// Drops consecutive elements for which `same_bucket(later, earlier)` returns `true`.
	pub fn dedup_by(&mut self, mut same_bucket: impl FnMut(&mut T, &mut T) -> bool) {
		self.slots.dedup_by(|a, b| same_bucket(a, b))
	}

	/// Drops consecutive equal elements.
	pub fn dedup(&mut self)
	where
		T: PartialEq,
	{
		self.dedup_by(|a, b| a == b)
	}

	/// Keeps only the elements for which `keep` returns `true`, in order.
	pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
		self.slots.retain(|slot| keep(slot))
	}

	#[track_caller]
	fn check_insertion_index(&self, index: usize) {
		let len = self.len();
		assert!(
			index <= len,
			"`MovingVec`: Insertion index (is {index}) should be <= len (is {len})."
		);
	}
}

impl<T: Clone> Clone for MovingVec<T> {
	/// Clones every element into a new allocation.
	fn clone(&self) -> Self {
		Self {
			slots: self.slots.clone(),
		}
	}

	fn clone_from(&mut self, source: &Self) {
		self.slots.clone_from(&source.slots)
	}
}

impl<T> Index<usize> for MovingVec<T> {
	type Output = T;

	#[track_caller]
	fn index(&self, index: usize) -> &Self::Output {
		&self.slots[index]
	}
}

impl<T> IndexMut<usize> for MovingVec<T> {
	#[track_caller]
	fn index_mut(&mut self, index: usize) -> &mut Self::Output {
		&mut self.slots[index]
	}
}

impl<T> FromIterator<T> for MovingVec<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		iter.into_iter()
			.map(ValuePtr::new)
			.collect::<Vec<_>>()
			.pipe(|slots| Self { slots })
	}
}

impl<T> Extend<T> for MovingVec<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		self.slots.extend(iter.into_iter().map(ValuePtr::new))
	}
}

impl<T> From<Vec<T>> for MovingVec<T> {
	fn from(values: Vec<T>) -> Self {
		values.into_iter().collect()
	}
}

impl<T, const N: usize> From<[T; N]> for MovingVec<T> {
	fn from(values: [T; N]) -> Self {
		values.into_iter().collect()
	}
}

impl<T> From<MovingVec<T>> for Vec<T> {
	fn from(values: MovingVec<T>) -> Self {
		values.into_iter().collect()
	}
}

impl<T: PartialEq> PartialEq for MovingVec<T> {
	fn eq(&self, other: &Self) -> bool {
		self.iter().eq(other.iter())
	}
}

impl<T: Eq> Eq for MovingVec<T> {}

impl<T: PartialOrd> PartialOrd for MovingVec<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.iter().partial_cmp(other.iter())
	}
}

impl<T: Ord> Ord for MovingVec<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.iter().cmp(other.iter())
	}
}

impl<T: Hash> Hash for MovingVec<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_usize(self.len());
		self.iter().for_each(|element| element.hash(state))
	}
}

impl<T: fmt::Debug> fmt::Debug for MovingVec<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T> IntoIterator for MovingVec<T> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		IntoIter {
			slots: self.slots.into_iter(),
		}
	}
}

impl<'a, T> IntoIterator for &'a MovingVec<T> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, T> IntoIterator for &'a mut MovingVec<T> {
	type Item = &'a mut T;
	type IntoIter = IterMut<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

/// Iterator over `&T`, looking through the handles of a [`MovingVec`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
	slots: slice::Iter<'a, ValuePtr<T>>,
}

impl<T> Clone for Iter<'_, T> {
	fn clone(&self) -> Self {
		Self {
			slots: self.slots.clone(),
		}
	}
}

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<Self::Item> {
		self.slots.next().map(|slot| &**slot)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.slots.size_hint()
	}

	fn nth(&mut self, n: usize) -> Option<Self::Item> {
		self.slots.nth(n).map(|slot| &**slot)
	}
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.slots.next_back().map(|slot| &**slot)
	}
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over `&mut T`, looking through the handles of a [`MovingVec`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T> {
	slots: slice::IterMut<'a, ValuePtr<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
	type Item = &'a mut T;

	fn next(&mut self) -> Option<Self::Item> {
		self.slots.next().map(|slot| &mut **slot)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.slots.size_hint()
	}

	fn nth(&mut self, n: usize) -> Option<Self::Item> {
		self.slots.nth(n).map(|slot| &mut **slot)
	}
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.slots.next_back().map(|slot| &mut **slot)
	}
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the elements of a [`MovingVec`].
///
/// Each element is moved out of its allocation as it is yielded.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
	slots: vec::IntoIter<ValuePtr<T>>,
}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	fn next(&mut self) -> Option<Self::Item> {
		self.slots.next().map(ValuePtr::into_value)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.slots.size_hint()
	}
}

impl<T> DoubleEndedIterator for IntoIter<T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.slots.next_back().map(ValuePtr::into_value)
	}
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
