//! A singly linked list built from [`ValuePtr`] links.

use crate::ValuePtr;
use alloc::vec::Vec;
use core::{cmp::Ordering, fmt, hash::Hash, iter::FusedIterator, mem};

type Link<T> = ValuePtr<Node<T>>;

struct Node<T> {
	value: T,
	next: Link<T>,
}

/// A singly linked list whose nodes own each other through [`ValuePtr`]s.
///
/// Values are never moved once pushed: [`reverse`](`ForwardList::reverse`) and [`sort`](`ForwardList::sort`)
/// relink the nodes instead.
///
/// ```
/// use value_ptr::ForwardList;
///
/// let mut list: ForwardList<i32> = [3, 1, 2].into_iter().collect();
/// let one: *const i32 = list.iter().nth(1).unwrap();
///
/// list.sort();
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
/// assert!(core::ptr::eq(one, list.front().unwrap()));
/// ```
///
/// Dropping and cloning walk the list iteratively, so long lists can't overflow the stack.
pub struct ForwardList<T> {
	head: Link<T>,
}

impl<T> Default for ForwardList<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Drop for ForwardList<T> {
	fn drop(&mut self) {
		self.clear()
	}
}

impl<T> ForwardList<T> {
	/// Creates a new, empty [`ForwardList`]. Doesn't allocate.
	#[must_use]
	pub fn new() -> Self {
		Self {
			head: ValuePtr::null(),
		}
	}

	/// Whether the list has no elements. *O(1)*.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.head.is_null()
	}

	/// Counts the elements. *O(n)*.
	#[must_use]
	pub fn len(&self) -> usize {
		self.iter().count()
	}

	/// Prepends `value`.
	pub fn push_front(&mut self, value: T) {
		let next = self.head.take();
		self.head = ValuePtr::new(Node { value, next });
	}

	/// Removes and returns the first element, if any.
	pub fn pop_front(&mut self) -> Option<T> {
		let node = self.head.release()?;
		let Node { value, next } = *node;
		self.head = next;
		Some(value)
	}

	/// The first element, if any.
	#[must_use]
	pub fn front(&self) -> Option<&T> {
		self.head.get().map(|node| &node.value)
	}

	/// The first element, mutably, if any.
	#[must_use]
	pub fn front_mut(&mut self) -> Option<&mut T> {
		self.head.get_mut().map(|node| &mut node.value)
	}

	/// Drops all elements, front to back.
	pub fn clear(&mut self) {
		let mut link = self.head.release();
		while let Some(mut node) = link {
			link = node.next.release();
		}
	}

	/// Reverses the order of the elements by relinking the nodes.
	pub fn reverse(&mut self) {
		let mut reversed = Link::null();
		let mut rest = self.head.take();
		while let Some(mut node) = rest.release() {
			rest = mem::replace(&mut node.next, reversed);
			reversed = ValuePtr::from_box(node);
		}
		self.head = reversed;
	}

	/// Stable sort by [`Ord`]. Only the links change.
	pub fn sort(&mut self)
	where
		T: Ord,
	{
		self.sort_by(T::cmp)
	}

	/// Stable sort by `compare`. Only the links change.
	///
	/// If `compare` panics, the list keeps all its elements in some order.
	pub fn sort_by(&mut self, mut compare: impl FnMut(&T, &T) -> Ordering) {
		let mut nodes = Vec::new();
		let mut rest = self.head.take();
		while let Some(mut node) = rest.release() {
			rest = node.next.take();
			nodes.push(node);
		}

		// Relinks in whatever order `nodes` ends up in, also while unwinding.
		let mut nodes = scopeguard::guard((nodes, &mut self.head), |(nodes, head)| {
			for mut node in nodes.into_iter().rev() {
				node.next = mem::take(head);
				*head = ValuePtr::from_box(node);
			}
		});
		let (nodes, _) = &mut *nodes;
		nodes.sort_by(|a, b| compare(&a.value, &b.value));
	}

	/// Iterates over the elements, front to back.
	pub fn iter(&self) -> Iter<'_, T> {
		Iter {
			next: self.head.get(),
		}
	}

	/// Iterates mutably over the elements, front to back.
	pub fn iter_mut(&mut self) -> IterMut<'_, T> {
		IterMut {
			next: self.head.get_mut(),
		}
	}
}

impl<T: Clone> Clone for ForwardList<T> {
	fn clone(&self) -> Self {
		self.iter().cloned().collect()
	}
}

impl<T> FromIterator<T> for ForwardList<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut list = Self::new();
		let mut tail = &mut list.head;
		for value in iter {
			tail = &mut tail
				.insert(Node {
					value,
					next: ValuePtr::null(),
				})
				.next;
		}
		list
	}
}

impl<T> Extend<T> for ForwardList<T> {
	/// Appends the items of `iter` at the back, in order.
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		self.reverse();
		let mut reversed = scopeguard::guard(self, |list| list.reverse());
		for value in iter {
			reversed.push_front(value)
		}
	}
}

impl<T: PartialEq> PartialEq for ForwardList<T> {
	fn eq(&self, other: &Self) -> bool {
		self.iter().eq(other.iter())
	}
}

impl<T: Eq> Eq for ForwardList<T> {}

impl<T: PartialOrd> PartialOrd for ForwardList<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.iter().partial_cmp(other.iter())
	}
}

impl<T: Ord> Ord for ForwardList<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.iter().cmp(other.iter())
	}
}

impl<T: Hash> Hash for ForwardList<T> {
	fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
		state.write_usize(self.len());
		self.iter().for_each(|value| value.hash(state))
	}
}

impl<T: fmt::Debug> fmt::Debug for ForwardList<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T> IntoIterator for ForwardList<T> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		IntoIter { list: self }
	}
}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, T> IntoIterator for &'a mut ForwardList<T> {
	type Item = &'a mut T;
	type IntoIter = IterMut<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

/// Iterator over the elements of a [`ForwardList`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
	next: Option<&'a Node<T>>,
}

impl<T> Clone for Iter<'_, T> {
	fn clone(&self) -> Self {
		Self { next: self.next }
	}
}

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<Self::Item> {
		self.next.map(|node| {
			self.next = node.next.get();
			&node.value
		})
	}
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over the elements of a [`ForwardList`], mutably.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T> {
	next: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
	type Item = &'a mut T;

	fn next(&mut self) -> Option<Self::Item> {
		self.next.take().map(|node| {
			self.next = node.next.get_mut();
			&mut node.value
		})
	}
}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the elements of a [`ForwardList`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
	list: ForwardList<T>,
}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	fn next(&mut self) -> Option<Self::Item> {
		self.list.pop_front()
	}
}

impl<T> FusedIterator for IntoIter<T> {}
