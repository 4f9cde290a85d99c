//! A sorted map over a contiguous sequence of entries.
//!
//! See [`FlatMap`].

use crate::{storage::Storage, Compare, Less, MovingVec, OutOfRange};
use alloc::vec::{self, Vec};
use core::{
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
	iter::FusedIterator,
	marker::PhantomData,
	mem,
	ops::{Index, Range, RangeBounds},
	slice,
};
use scopeguard::ScopeGuard;
use tap::Tap;

/// A map that keeps its entries sorted by key in one sequence `S`, using binary search for lookups.
///
/// Keys are unique: Inserting an entry whose key is *equivalent* (see [`Compare`]) to an existing one
/// leaves the map unchanged.
///
/// Positions are plain indices into the sorted sequence.
/// They are invalidated by any insertion or removal before them.
///
/// # Storage
///
/// - [`StableFlatMap`] (the default) stores its entries in a [`MovingVec`].
///   **Entries never move in memory** while they are in the map, and shifting them around is cheap regardless of their size.
/// - [`UnstableFlatMap`] stores its entries directly in a [`Vec`], which is faster to search,
///   but any insertion or removal may move every entry.
///
/// ```
/// use value_ptr::FlatMap;
///
/// let mut map: FlatMap<u32, &str> = FlatMap::new();
/// assert_eq!(map.emplace(2, "two"), (0, true));
/// assert_eq!(map.emplace(1, "one"), (0, true));
/// assert_eq!(map.emplace(2, "deux"), (1, false));
///
/// assert_eq!(map[&2], "two");
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2]);
/// ```
pub struct FlatMap<K, V, C = Less, S = MovingVec<(K, V)>> {
	entries: S,
	compare: C,
	_entries: PhantomData<(K, V)>,
}

/// A [`FlatMap`] whose entries keep their addresses.
pub type StableFlatMap<K, V, C = Less> = FlatMap<K, V, C, MovingVec<(K, V)>>;

/// A [`FlatMap`] with its entries stored inline.
pub type UnstableFlatMap<K, V, C = Less> = FlatMap<K, V, C, Vec<(K, V)>>;

impl<K, V, C: Default, S: Storage<(K, V)>> Default for FlatMap<K, V, C, S> {
	fn default() -> Self {
		Self::with_comparator(C::default())
	}
}

impl<K, V, C: Default, S: Storage<(K, V)>> FlatMap<K, V, C, S> {
	/// Creates a new, empty [`FlatMap`].
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a new, empty [`FlatMap`] with room for at least `capacity` entries.
	#[must_use]
	pub fn with_capacity(capacity: usize) -> Self {
		Self::new().tap_mut(|map| map.reserve(capacity))
	}
}

impl<K, V, C, S: Storage<(K, V)>> FlatMap<K, V, C, S> {
	/// Creates a new, empty [`FlatMap`] ordered by `compare`.
	#[must_use]
	pub fn with_comparator(compare: C) -> Self {
		Self {
			entries: S::default(),
			compare,
			_entries: PhantomData,
		}
	}

	/// The key ordering.
	#[must_use]
	pub fn comparator(&self) -> &C {
		&self.compare
	}

	/// The number of entries.
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.slots().len()
	}

	/// Whether there are no entries.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.slots().is_empty()
	}

	/// How many entries fit without reallocating the backing sequence.
	#[must_use]
	pub fn capacity(&self) -> usize {
		S::slot_capacity(&self.entries)
	}

	/// Reserves room for at least `additional` more entries.
	pub fn reserve(&mut self, additional: usize) {
		self.entries.slots_mut().reserve(additional)
	}

	/// Shrinks the backing sequence as much as possible.
	pub fn shrink_to_fit(&mut self) {
		self.entries.slots_mut().shrink_to_fit()
	}

	/// Drops all entries.
	pub fn clear(&mut self) {
		self.entries.slots_mut().clear()
	}

	/// The entry at `index` in key order, if in bounds.
	#[must_use]
	pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
		self.entries.slots().get(index).map(|slot| {
			let (k, v) = S::value(slot);
			(k, v)
		})
	}

	/// The entry at `index` in key order, with its value mutable, if in bounds.
	#[must_use]
	pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
		self.entries.slots_mut().get_mut(index).map(|slot| {
			let (k, v) = S::value_mut(slot);
			(&*k, v)
		})
	}

	/// Removes the entry at `index`.
	///
	/// # Panics
	///
	/// Iff `index >= len`.
	#[track_caller]
	pub fn erase_at(&mut self, index: usize) {
		drop(self.entries.slots_mut().remove(index))
	}

	/// Removes the entries in the index `range`.
	///
	/// # Panics
	///
	/// Iff `range` is out of bounds or decreasing.
	#[track_caller]
	pub fn erase_range(&mut self, range: impl RangeBounds<usize>) {
		self.entries.slots_mut().drain(range);
	}

	/// Iterates over the entries in key order.
	pub fn iter(&self) -> Iter<'_, K, V, S> {
		Iter {
			slots: self.entries.slots().iter(),
			_entries: PhantomData,
		}
	}

	/// Iterates over the entries in key order, with mutable values.
	pub fn iter_mut(&mut self) -> IterMut<'_, K, V, S> {
		IterMut {
			slots: self.entries.slots_mut().iter_mut(),
			_entries: PhantomData,
		}
	}

	/// Iterates over the keys in order.
	pub fn keys(&self) -> Keys<'_, K, V, S> {
		Keys { entries: self.iter() }
	}

	/// Iterates over the values in key order.
	pub fn values(&self) -> Values<'_, K, V, S> {
		Values {
			entries: self.iter(),
		}
	}

	/// Iterates mutably over the values in key order.
	pub fn values_mut(&mut self) -> ValuesMut<'_, K, V, S> {
		ValuesMut {
			entries: self.iter_mut(),
		}
	}

	fn key_at(&self, index: usize) -> &K {
		&S::value(&self.entries.slots()[index]).0
	}
}

impl<K, V, C: Compare<K>, S: Storage<(K, V)>> FlatMap<K, V, C, S> {
	/// The index of the first entry whose key is not ordered before `key`.
	///
	/// Returns [`len`](`FlatMap::len`) if there is none.
	#[must_use]
	pub fn lower_bound(&self, key: &K) -> usize {
		self.entries
			.slots()
			.partition_point(|slot| self.compare.less(entry_key(S::value(slot)), key))
	}

	/// The index of the first entry whose key is ordered after `key`.
	///
	/// Returns [`len`](`FlatMap::len`) if there is none.
	#[must_use]
	pub fn upper_bound(&self, key: &K) -> usize {
		self.entries
			.slots()
			.partition_point(|slot| !self.compare.less(key, entry_key(S::value(slot))))
	}

	/// The index range of entries with keys equivalent to `key`.
	///
	/// Since keys are unique, this is empty or has length one.
	#[must_use]
	pub fn equal_range(&self, key: &K) -> Range<usize> {
		self.lower_bound(key)..self.upper_bound(key)
	}

	/// The index of the entry with a key equivalent to `key`, if any.
	#[must_use]
	pub fn find(&self, key: &K) -> Option<usize> {
		let index = self.lower_bound(key);
		(index < self.len() && !self.compare.less(key, self.key_at(index))).then_some(index)
	}

	/// Whether an entry with a key equivalent to `key` exists.
	#[must_use]
	pub fn contains_key(&self, key: &K) -> bool {
		self.find(key).is_some()
	}

	/// The number of entries with a key equivalent to `key`, so either `0` or `1`.
	#[must_use]
	pub fn count(&self, key: &K) -> usize {
		usize::from(self.contains_key(key))
	}

	/// Borrows the value for `key`, if present.
	#[must_use]
	pub fn get(&self, key: &K) -> Option<&V> {
		self.get_key_value(key).map(|(_, v)| v)
	}

	/// Borrows the stored key and value for `key`, if present.
	#[must_use]
	pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
		self.find(key).and_then(|index| self.get_index(index))
	}

	/// Mutably borrows the value for `key`, if present.
	#[must_use]
	pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
		self.find(key)
			.and_then(|index| self.get_index_mut(index))
			.map(|(_, v)| v)
	}

	/// Borrows the value for `key`, or reports why not.
	///
	/// # Errors
	///
	/// [`OutOfRange::Key`] iff no such entry exists.
	pub fn at(&self, key: &K) -> Result<&V, OutOfRange> {
		self.get(key).ok_or(OutOfRange::Key)
	}

	/// Mutably borrows the value for `key`, or reports why not.
	///
	/// # Errors
	///
	/// [`OutOfRange::Key`] iff no such entry exists.
	pub fn at_mut(&mut self, key: &K) -> Result<&mut V, OutOfRange> {
		self.get_mut(key).ok_or(OutOfRange::Key)
	}

	/// Inserts `value` under `key` unless an equivalent key is present.
	///
	/// Returns the index of the entry with that key and whether it was inserted.
	/// If it wasn't, `key` and `value` are dropped and the map is unchanged.
	pub fn emplace(&mut self, key: K, value: V) -> (usize, bool) {
		self.emplace_with(key, || value)
	}

	/// Like [`emplace`](`FlatMap::emplace`), but only calls `make` if the entry is actually inserted.
	pub fn emplace_with(&mut self, key: K, make: impl FnOnce() -> V) -> (usize, bool) {
		let index = self.upper_bound(&key);
		if index > 0 && !self.compare.less(self.key_at(index - 1), &key) {
			return (index - 1, false);
		}
		self.entries
			.slots_mut()
			.insert(index, S::slot((key, make())));
		(index, true)
	}

	/// [`emplace`](`FlatMap::emplace`) for an entry tuple.
	pub fn insert(&mut self, (key, value): (K, V)) -> (usize, bool) {
		self.emplace(key, value)
	}

	/// Inserts `value` under `key` at `hint` if that keeps the entries strictly ordered,
	/// skipping the search.
	///
	/// Otherwise (including when `hint` is out of bounds), behaves like [`emplace`](`FlatMap::emplace`).
	///
	/// Returns the index of the entry with that key.
	pub fn emplace_hint(&mut self, hint: usize, key: K, value: V) -> usize {
		let len = self.len();
		let fits = hint <= len
			&& (hint == len || self.compare.less(&key, self.key_at(hint)))
			&& (hint == 0 || self.compare.less(self.key_at(hint - 1), &key));
		if fits {
			self.entries
				.slots_mut()
				.insert(hint, S::slot((key, value)));
			hint
		} else {
			self.emplace(key, value).0
		}
	}

	/// The value for `key`, inserting [`V::default()`](`Default::default`) first if there is none.
	pub fn get_or_insert_default(&mut self, key: K) -> &mut V
	where
		V: Default,
	{
		let (index, _) = self.emplace_with(key, V::default);
		&mut S::value_mut(&mut self.entries.slots_mut()[index]).1
	}

	/// Inserts all `entries` whose keys aren't present yet.
	///
	/// Entries already in the map win over incoming ones with equivalent keys,
	/// and among incoming entries with equivalent keys, the first one wins.
	///
	/// The incoming entries are appended, sorted among themselves and then merged into the existing ones,
	/// which is cheaper than inserting them one by one.
	///
	/// If `entries` or the comparator panics, the map stays sorted and keeps all entries it had before,
	/// but some or all of the incoming ones may be lost.
	pub fn insert_many(&mut self, entries: impl IntoIterator<Item = (K, V)>) {
		let Self {
			entries: storage,
			compare,
			..
		} = self;
		let slots = storage.slots_mut();
		let mid = slots.len();

		let mut appended = scopeguard::guard(&mut *slots, |slots| slots.truncate(mid));
		appended.extend(entries.into_iter().map(S::slot));
		appended[mid..]
			.sort_by(|a, b| compare.ordering(entry_key(S::value(a)), entry_key(S::value(b))));
		let slots = ScopeGuard::into_inner(appended);

		if slots.len() == mid {
			return;
		}
		let incoming = slots.split_off(mid);
		let existing = mem::replace(slots, Vec::with_capacity(mid + incoming.len()));

		// Runs on success too, by which point `existing` is exhausted.
		let mut merge = scopeguard::guard(
			(slots, existing.into_iter().peekable()),
			|(merged, existing)| merged.extend(existing),
		);
		let (merged, existing) = &mut *merge;
		for entry in incoming {
			let key = entry_key(S::value(&entry));
			while let Some(head) = existing.peek() {
				if compare.less(key, entry_key(S::value(head))) {
					break;
				}
				merged.extend(existing.next());
			}

			// `merged` is sorted and its last key is not after `key`.
			match merged.last() {
				Some(last) if !compare.less(entry_key(S::value(last)), key) => (),
				_ => merged.push(entry),
			}
		}
	}

	/// Removes the entry for `key`, returning how many entries were removed (`0` or `1`).
	pub fn erase(&mut self, key: &K) -> usize {
		usize::from(self.remove_entry(key).is_some())
	}

	/// Removes the entry for `key` and returns its value, if present.
	pub fn remove(&mut self, key: &K) -> Option<V> {
		self.remove_entry(key).map(|(_, v)| v)
	}

	/// Removes the entry for `key` and returns it, if present.
	pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
		let index = self.find(key)?;
		Some(S::unslot(self.entries.slots_mut().remove(index)))
	}
}

fn entry_key<K, V>(entry: &(K, V)) -> &K {
	&entry.0
}

impl<K, V, C: Clone, S: Storage<(K, V)> + Clone> Clone for FlatMap<K, V, C, S> {
	fn clone(&self) -> Self {
		Self {
			entries: self.entries.clone(),
			compare: self.compare.clone(),
			_entries: PhantomData,
		}
	}

	fn clone_from(&mut self, source: &Self) {
		self.entries.clone_from(&source.entries);
		self.compare.clone_from(&source.compare);
	}
}

impl<K, V, C: Compare<K>, S: Storage<(K, V)>> Index<&K> for FlatMap<K, V, C, S> {
	type Output = V;

	/// # Panics
	///
	/// Iff there is no entry for `key`.
	#[track_caller]
	fn index(&self, key: &K) -> &Self::Output {
		match self.get(key) {
			Some(value) => value,
			None => panic!("`FlatMap`: Key not found."),
		}
	}
}

impl<K, V, C: Compare<K> + Default, S: Storage<(K, V)>> FromIterator<(K, V)>
	for FlatMap<K, V, C, S>
{
	/// Collects `iter` into a sorted map. For equivalent keys, the first entry wins.
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::new().tap_mut(|map| map.insert_many(iter))
	}
}

impl<K, V, C: Compare<K>, S: Storage<(K, V)>> Extend<(K, V)> for FlatMap<K, V, C, S> {
	/// See [`FlatMap::insert_many`].
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		self.insert_many(iter)
	}
}

impl<K, V, C: Compare<K> + Default, S: Storage<(K, V)>, const N: usize> From<[(K, V); N]>
	for FlatMap<K, V, C, S>
{
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}

impl<K: PartialEq, V: PartialEq, C, S: Storage<(K, V)>> PartialEq for FlatMap<K, V, C, S> {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().eq(other.iter())
	}
}

impl<K: Eq, V: Eq, C, S: Storage<(K, V)>> Eq for FlatMap<K, V, C, S> {}

impl<K: PartialOrd, V: PartialOrd, C, S: Storage<(K, V)>> PartialOrd for FlatMap<K, V, C, S> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.iter().partial_cmp(other.iter())
	}
}

impl<K: Ord, V: Ord, C, S: Storage<(K, V)>> Ord for FlatMap<K, V, C, S> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.iter().cmp(other.iter())
	}
}

impl<K: Hash, V: Hash, C, S: Storage<(K, V)>> Hash for FlatMap<K, V, C, S> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_usize(self.len());
		self.iter().for_each(|entry| entry.hash(state))
	}
}

impl<K: fmt::Debug, V: fmt::Debug, C, S: Storage<(K, V)>> fmt::Debug for FlatMap<K, V, C, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<K, V, C, S: Storage<(K, V)>> IntoIterator for FlatMap<K, V, C, S> {
	type Item = (K, V);
	type IntoIter = IntoIter<K, V, S>;

	fn into_iter(self) -> Self::IntoIter {
		IntoIter {
			slots: self.entries.into_slots().into_iter(),
			_entries: PhantomData,
		}
	}
}

impl<'a, K, V, C, S: Storage<(K, V)>> IntoIterator for &'a FlatMap<K, V, C, S> {
	type Item = (&'a K, &'a V);
	type IntoIter = Iter<'a, K, V, S>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, K, V, C, S: Storage<(K, V)>> IntoIterator for &'a mut FlatMap<K, V, C, S> {
	type Item = (&'a K, &'a mut V);
	type IntoIter = IterMut<'a, K, V, S>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

/// Iterator over the entries of a [`FlatMap`], in key order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, S: Storage<(K, V)>> {
	slots: slice::Iter<'a, S::Slot>,
	_entries: PhantomData<&'a (K, V)>,
}

impl<K, V, S: Storage<(K, V)>> Clone for Iter<'_, K, V, S> {
	fn clone(&self) -> Self {
		Self {
			slots: self.slots.clone(),
			_entries: PhantomData,
		}
	}
}

impl<'a, K, V, S: Storage<(K, V)>> Iterator for Iter<'a, K, V, S> {
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		self.slots.next().map(|slot| {
			let (k, v) = S::value(slot);
			(k, v)
		})
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.slots.size_hint()
	}
}

impl<K, V, S: Storage<(K, V)>> DoubleEndedIterator for Iter<'_, K, V, S> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.slots.next_back().map(|slot| {
			let (k, v) = S::value(slot);
			(k, v)
		})
	}
}

impl<K, V, S: Storage<(K, V)>> ExactSizeIterator for Iter<'_, K, V, S> {}
impl<K, V, S: Storage<(K, V)>> FusedIterator for Iter<'_, K, V, S> {}

/// Iterator over the entries of a [`FlatMap`], in key order, with mutable values.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V, S: Storage<(K, V)>> {
	slots: slice::IterMut<'a, S::Slot>,
	_entries: PhantomData<&'a mut (K, V)>,
}

impl<'a, K, V, S: Storage<(K, V)>> Iterator for IterMut<'a, K, V, S> {
	type Item = (&'a K, &'a mut V);

	fn next(&mut self) -> Option<Self::Item> {
		self.slots.next().map(|slot| {
			let (k, v) = S::value_mut(slot);
			(&*k, v)
		})
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.slots.size_hint()
	}
}

impl<K, V, S: Storage<(K, V)>> DoubleEndedIterator for IterMut<'_, K, V, S> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.slots.next_back().map(|slot| {
			let (k, v) = S::value_mut(slot);
			(&*k, v)
		})
	}
}

impl<K, V, S: Storage<(K, V)>> ExactSizeIterator for IterMut<'_, K, V, S> {}
impl<K, V, S: Storage<(K, V)>> FusedIterator for IterMut<'_, K, V, S> {}

/// Owning iterator over the entries of a [`FlatMap`], in key order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<K, V, S: Storage<(K, V)>> {
	slots: vec::IntoIter<S::Slot>,
	_entries: PhantomData<(K, V)>,
}

impl<K, V, S: Storage<(K, V)>> Iterator for IntoIter<K, V, S> {
	type Item = (K, V);

	fn next(&mut self) -> Option<Self::Item> {
		self.slots.next().map(S::unslot)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.slots.size_hint()
	}
}

impl<K, V, S: Storage<(K, V)>> DoubleEndedIterator for IntoIter<K, V, S> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.slots.next_back().map(S::unslot)
	}
}

impl<K, V, S: Storage<(K, V)>> ExactSizeIterator for IntoIter<K, V, S> {}
impl<K, V, S: Storage<(K, V)>> FusedIterator for IntoIter<K, V, S> {}

/// Iterator over the keys of a [`FlatMap`], in order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, S: Storage<(K, V)>> {
	entries: Iter<'a, K, V, S>,
}

impl<'a, K, V, S: Storage<(K, V)>> Iterator for Keys<'a, K, V, S> {
	type Item = &'a K;

	fn next(&mut self) -> Option<Self::Item> {
		self.entries.next().map(|(k, _)| k)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.entries.size_hint()
	}
}

impl<K, V, S: Storage<(K, V)>> DoubleEndedIterator for Keys<'_, K, V, S> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.entries.next_back().map(|(k, _)| k)
	}
}

impl<K, V, S: Storage<(K, V)>> ExactSizeIterator for Keys<'_, K, V, S> {}
impl<K, V, S: Storage<(K, V)>> FusedIterator for Keys<'_, K, V, S> {}

/// Iterator over the values of a [`FlatMap`], in key order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, S: Storage<(K, V)>> {
	entries: Iter<'a, K, V, S>,
}

impl<'a, K, V, S: Storage<(K, V)>> Iterator for Values<'a, K, V, S> {
	type Item = &'a V;

	fn next(&mut self) -> Option<Self::Item> {
		self.entries.next().map(|(_, v)| v)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.entries.size_hint()
	}
}

impl<K, V, S: Storage<(K, V)>> DoubleEndedIterator for Values<'_, K, V, S> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.entries.next_back().map(|(_, v)| v)
	}
}

impl<K, V, S: Storage<(K, V)>> ExactSizeIterator for Values<'_, K, V, S> {}
impl<K, V, S: Storage<(K, V)>> FusedIterator for Values<'_, K, V, S> {}

/// Iterator over the values of a [`FlatMap`], mutably and in key order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V, S: Storage<(K, V)>> {
	entries: IterMut<'a, K, V, S>,
}

impl<'a, K, V, S: Storage<(K, V)>> Iterator for ValuesMut<'a, K, V, S> {
	type Item = &'a mut V;

	fn next(&mut self) -> Option<Self::Item> {
		self.entries.next().map(|(_, v)| v)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.entries.size_hint()
	}
}

impl<K, V, S: Storage<(K, V)>> DoubleEndedIterator for ValuesMut<'_, K, V, S> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.entries.next_back().map(|(_, v)| v)
	}
}

impl<K, V, S: Storage<(K, V)>> ExactSizeIterator for ValuesMut<'_, K, V, S> {}
impl<K, V, S: Storage<(K, V)>> FusedIterator for ValuesMut<'_, K, V, S> {}

#[cfg(test)]
mod tests {
	use super::*;
	use alloc::vec;

	#[test]
	fn insert_many_merges_and_deduplicates() {
		let mut map: UnstableFlatMap<u8, char> = [(1, 'a'), (5, 'e'), (9, 'i')].into();
		map.insert_many([(4, 'd'), (5, 'x'), (2, 'b'), (4, 'y'), (10, 'j'), (0, '0')]);
		assert_eq!(
			map.into_iter().collect::<Vec<_>>(),
			vec![
				(0, '0'),
				(1, 'a'),
				(2, 'b'),
				(4, 'd'),
				(5, 'e'),
				(9, 'i'),
				(10, 'j'),
			]
		);
	}

	#[test]
	fn insert_many_keeps_existing_on_panic() {
		use std::panic::{catch_unwind, AssertUnwindSafe};

		let unlucky = |lhs: &i32, rhs: &i32| {
			assert!(*lhs != 13 && *rhs != 13, "unlucky");
			lhs < rhs
		};
		let mut map = FlatMap::<i32, i32, _, MovingVec<_>>::with_comparator(unlucky);
		map.insert_many([(3, 3), (1, 1)]);

		let result = catch_unwind(AssertUnwindSafe(|| map.insert_many([(2, 2), (13, 13)])));
		assert!(result.is_err());
		let keys = map.keys().copied().collect::<Vec<_>>();
		assert!(keys.contains(&1) && keys.contains(&3) && !keys.contains(&13));
		assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));

		map.insert_many([(4, 4), (4, 5)]);
		assert_eq!(map.count(&4), 1);
		assert_eq!(map.at(&4), Ok(&4));
	}

	#[test]
	fn emplace_hint_falls_back() {
		let mut map: StableFlatMap<i32, ()> = [(10, ()), (20, ())].into();
		assert_eq!(map.emplace_hint(1, 15, ()), 1);
		assert_eq!(map.emplace_hint(0, 30, ()), 3);
		assert_eq!(map.emplace_hint(99, 5, ()), 0);
		assert_eq!(map.emplace_hint(2, 15, ()), 2);
		assert_eq!(map.keys().copied().collect::<Vec<_>>(), [5, 10, 15, 20, 30]);
	}
}
