use crate::policy::{Cloner, DefaultDelete, DefaultNew, Deleter};
use alloc::boxed::Box;
use core::{
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
	marker::PhantomData,
	mem,
	ops::{Deref, DerefMut},
	ptr::{self, NonNull},
};
use tap::Pipe;

/// An owning pointer with value semantics.
///
/// Like a [`Box`], a [`ValuePtr`] exclusively owns its pointee, but it may also be null,
/// and it clones its pointee through a pluggable [`Cloner`] and releases it through a pluggable [`Deleter`].
///
/// - **Cloning** a non-null [`ValuePtr`] always allocates a new, independent pointee.
/// - **Moving** a [`ValuePtr`] transfers the allocation. The pointee itself stays where it is.
/// - **Comparisons** ([`PartialEq`], [`Ord`], [`Hash`]) are by address, not by value.
///   Two handles are only equal if they are both null (or, through unsafe code, alias).
///
/// With zero-sized strategies, a [`ValuePtr`] to a sized type is exactly one pointer wide.
///
/// # Array pointees
///
/// `ValuePtr<[T; N]>` has its length fixed by the type, `ValuePtr<[T]>` receives it on construction.
/// Both can be indexed through [`Deref`].
///
/// ```
/// use value_ptr::ValuePtr;
///
/// let mut numbers: ValuePtr<[usize]> = ValuePtr::new_slice(4);
/// for (i, n) in numbers.iter_mut().enumerate() {
/// 	*n = i * 2;
/// }
/// assert_eq!(numbers[3], 6);
///
/// let copy = numbers.clone();
/// assert_eq!(*copy, [0, 2, 4, 6]);
/// assert_ne!(copy, numbers);
/// ```
pub struct ValuePtr<T: ?Sized, C = DefaultNew, D: Deleter<T> = DefaultDelete> {
	pointee: Option<NonNull<T>>,
	cloner: C,
	deleter: D,
	_owns: PhantomData<T>,
}

const _: () = assert!(mem::size_of::<ValuePtr<u64>>() == mem::size_of::<*const u64>());
const _: () = assert!(mem::size_of::<ValuePtr<[u64; 16]>>() == mem::size_of::<*const u64>());

// Same reasoning as for `Box<T>`: The pointee is owned exclusively.
unsafe impl<T: ?Sized + Send, C: Send, D: Deleter<T> + Send> Send for ValuePtr<T, C, D> {}
unsafe impl<T: ?Sized + Sync, C: Sync, D: Deleter<T> + Sync> Sync for ValuePtr<T, C, D> {}

impl<T: ?Sized, C: Default, D: Deleter<T> + Default> Default for ValuePtr<T, C, D> {
	fn default() -> Self {
		Self::null_with(C::default(), D::default())
	}
}

impl<T: ?Sized, C, D: Deleter<T>> Drop for ValuePtr<T, C, D> {
	fn drop(&mut self) {
		self.replace_pointee(None)
	}
}

impl<T: ?Sized> ValuePtr<T> {
	/// Creates a null [`ValuePtr`] with default strategies.
	#[must_use]
	pub const fn null() -> Self {
		Self::null_with(DefaultNew, DefaultDelete)
	}

	/// Adopts `value`'s allocation. Nothing is cloned.
	#[must_use]
	pub fn from_box(value: Box<T>) -> Self {
		Self::from_box_with(value, DefaultNew, DefaultDelete)
	}

	/// Adopts the allocation behind `raw`. Nothing is cloned.
	///
	/// A null `raw` results in a null [`ValuePtr`].
	///
	/// # Safety
	///
	/// `raw` must be null or come from [`Box::into_raw`] (or an equivalent like [`ValuePtr::release`]),
	/// and must not be used by anything else afterwards.
	#[must_use]
	pub unsafe fn from_raw(raw: *mut T) -> Self {
		unsafe { Self::from_raw_with(raw, DefaultNew, DefaultDelete) }
	}

	/// Creates a [`ValuePtr`] to a new copy of `source`.
	#[must_use]
	pub fn cloned_from(source: &T) -> Self
	where
		DefaultNew: Cloner<T>,
	{
		DefaultNew.clone_boxed(source).pipe(Self::from_box)
	}
}

impl<T> ValuePtr<T> {
	/// Moves `value` into a new allocation.
	#[must_use]
	pub fn new(value: T) -> Self {
		Self::with_policies(value, DefaultNew, DefaultDelete)
	}

	/// Converts `value` into a `T` inside a new allocation.
	#[must_use]
	pub fn converted_from<U>(value: U) -> Self
	where
		T: From<U>,
	{
		Self::new(T::from(value))
	}
}

impl<T: Default> ValuePtr<[T]> {
	/// Allocates `len` default values as slice.
	///
	/// The length is carried by the (fat) pointer, so indexing stays bounds-checked.
	#[must_use]
	pub fn new_slice(len: usize) -> Self {
		core::iter::repeat_with(T::default)
			.take(len)
			.collect::<Box<[T]>>()
			.pipe(Self::from_box)
	}
}

impl<T, C, D: Deleter<T>> ValuePtr<T, C, D> {
	/// Moves `value` into a new allocation managed by the given strategies.
	#[must_use]
	pub fn with_policies(value: T, cloner: C, deleter: D) -> Self {
		Self::from_box_with(Box::new(value), cloner, deleter)
	}

	/// The pointee's address, or null.
	#[must_use]
	pub fn as_ptr(&self) -> *const T {
		self.pointee
			.map_or(ptr::null(), |pointee| pointee.as_ptr().cast_const())
	}

	/// Replaces the pointee with `value` and returns a reference to it.
	///
	/// The previous pointee, if any, is released through the deleter.
	pub fn insert(&mut self, value: T) -> &mut T {
		let pointee = NonNull::from(Box::leak(Box::new(value)));
		self.replace_pointee(Some(pointee));
		//SAFETY: Just allocated and now exclusively owned by `self`, which stays borrowed.
		unsafe { &mut *pointee.as_ptr() }
	}

	/// Moves the pointee out, or returns [`None`] if null.
	///
	/// Like [`release`](`ValuePtr::release`), this bypasses the deleter.
	#[must_use]
	pub fn into_inner(mut self) -> Option<T> {
		self.release().map(|value| *value)
	}

	/// Moves the pointee out.
	///
	/// Like [`release`](`ValuePtr::release`), this bypasses the deleter.
	///
	/// # Panics
	///
	/// Iff `self` is null.
	#[must_use]
	#[track_caller]
	pub fn into_value(self) -> T {
		match self.into_inner() {
			Some(value) => value,
			None => null_dereference(),
		}
	}
}

impl<T: ?Sized, C, D: Deleter<T>> ValuePtr<T, C, D> {
	/// Creates a null [`ValuePtr`] with the given strategies.
	#[must_use]
	pub const fn null_with(cloner: C, deleter: D) -> Self {
		Self {
			pointee: None,
			cloner,
			deleter,
			_owns: PhantomData,
		}
	}

	/// Adopts `value`'s allocation, to be managed by the given strategies.
	#[must_use]
	pub fn from_box_with(value: Box<T>, cloner: C, deleter: D) -> Self {
		Self {
			pointee: Some(NonNull::from(Box::leak(value))),
			cloner,
			deleter,
			_owns: PhantomData,
		}
	}

	/// Adopts the allocation behind `raw`, to be managed by the given strategies.
	///
	/// # Safety
	///
	/// See [`ValuePtr::from_raw`].
	#[must_use]
	pub unsafe fn from_raw_with(raw: *mut T, cloner: C, deleter: D) -> Self {
		Self {
			pointee: NonNull::new(raw),
			cloner,
			deleter,
			_owns: PhantomData,
		}
	}

	/// Creates a [`ValuePtr`] to a copy of `source` made by `cloner`.
	#[must_use]
	pub fn cloned_from_with(source: &T, cloner: C, deleter: D) -> Self
	where
		C: Cloner<T>,
	{
		let value = cloner.clone_boxed(source);
		Self::from_box_with(value, cloner, deleter)
	}

	/// Borrows the pointee, iff not null.
	#[must_use]
	pub fn get(&self) -> Option<&T> {
		//SAFETY: Owned exclusively by `self`, so the borrow can't alias a mutable one.
		self.pointee.map(|pointee| unsafe { pointee.as_ref() })
	}

	/// Mutably borrows the pointee, iff not null.
	#[must_use]
	pub fn get_mut(&mut self) -> Option<&mut T> {
		//SAFETY: Owned exclusively by `self`, which is borrowed mutably.
		self.pointee.map(|mut pointee| unsafe { pointee.as_mut() })
	}

	/// The pointee's address, iff not null.
	///
	/// Unlike [`as_ptr`](`ValuePtr::as_ptr`), this works for unsized pointees.
	#[must_use]
	pub fn as_non_null(&self) -> Option<NonNull<T>> {
		self.pointee
	}

	/// Whether there is a pointee.
	#[must_use]
	pub fn is_some(&self) -> bool {
		self.pointee.is_some()
	}

	/// Whether there is no pointee.
	#[must_use]
	pub fn is_null(&self) -> bool {
		self.pointee.is_none()
	}

	/// Releases the current pointee (if any) through the deleter and adopts `replacement`.
	///
	/// `self` owns `replacement` before the deleter runs,
	/// so a panicking deleter can't leave it dangling or leak `replacement`.
	pub fn reset(&mut self, replacement: Option<Box<T>>) {
		self.replace_pointee(replacement.map(|value| NonNull::from(Box::leak(value))))
	}

	/// Gives up ownership of the pointee **without** calling the deleter.
	#[must_use = "dropping the released `Box` bypasses the deleter"]
	pub fn release(&mut self) -> Option<Box<T>> {
		//SAFETY: Allocated as `Box` (see `from_raw`'s contract), and no longer reachable through `self`.
		self.pointee
			.take()
			.map(|pointee| unsafe { Box::from_raw(pointee.as_ptr()) })
	}

	/// Moves the pointee into a [`ValuePtr`] of another type, passing its [`Box`] through `conversion`.
	///
	/// This is mainly for unsizing, e.g. from `ValuePtr<Square>` to `ValuePtr<dyn Shape, ShapeCloner>`.
	/// Like [`release`](`ValuePtr::release`), this bypasses `self`'s deleter.
	/// A null `self` converts to a null [`ValuePtr`] without calling `conversion`.
	///
	/// ```
	/// use core::fmt::Display;
	/// use value_ptr::{DefaultDelete, ValuePtr};
	///
	/// let number = ValuePtr::new(5_u8);
	/// let display: ValuePtr<dyn Display, (), DefaultDelete> =
	/// 	number.convert(|number| number as Box<dyn Display>, (), DefaultDelete);
	/// assert_eq!(display.to_string(), "5");
	/// ```
	pub fn convert<U: ?Sized, C2, D2: Deleter<U>>(
		mut self,
		conversion: impl FnOnce(Box<T>) -> Box<U>,
		cloner: C2,
		deleter: D2,
	) -> ValuePtr<U, C2, D2> {
		match self.release() {
			Some(value) => ValuePtr::from_box_with(conversion(value), cloner, deleter),
			None => ValuePtr::null_with(cloner, deleter),
		}
	}

	/// Moves the whole handle out, leaving a null one with default strategies in its place.
	#[must_use]
	pub fn take(&mut self) -> Self
	where
		C: Default,
		D: Default,
	{
		mem::take(self)
	}

	/// Exchanges pointees and strategies with `other`.
	pub fn swap(&mut self, other: &mut Self) {
		mem::swap(self, other)
	}

	/// The cloning strategy.
	#[must_use]
	pub fn cloner(&self) -> &C {
		&self.cloner
	}

	/// The cloning strategy, mutably.
	pub fn cloner_mut(&mut self) -> &mut C {
		&mut self.cloner
	}

	/// The deleting strategy.
	#[must_use]
	pub fn deleter(&self) -> &D {
		&self.deleter
	}

	/// The deleting strategy, mutably.
	pub fn deleter_mut(&mut self) -> &mut D {
		&mut self.deleter
	}

	fn replace_pointee(&mut self, replacement: Option<NonNull<T>>) {
		if let Some(previous) = mem::replace(&mut self.pointee, replacement) {
			//SAFETY: Allocated as `Box` and no longer reachable through `self`.
			self.deleter
				.delete(unsafe { Box::from_raw(previous.as_ptr()) })
		}
	}

	fn address(&self) -> *const () {
		self.pointee
			.map_or(ptr::null(), |pointee| pointee.cast::<()>().as_ptr().cast_const())
	}
}

impl<T: ?Sized, C, D> Clone for ValuePtr<T, C, D>
where
	C: Cloner<T> + Clone,
	D: Deleter<T> + Clone,
{
	fn clone(&self) -> Self {
		let cloner = self.cloner.clone();
		let deleter = self.deleter.clone();
		match self.get() {
			Some(value) => Self::cloned_from_with(value, cloner, deleter),
			None => Self::null_with(cloner, deleter),
		}
	}

	/// Clones `source`'s pointee first, and only then releases the current one.
	///
	/// If cloning panics, `self` is left unchanged.
	fn clone_from(&mut self, source: &Self) {
		let replacement = source.get().map(|value| source.cloner.clone_boxed(value));
		let cloner = source.cloner.clone();
		let deleter = source.deleter.clone();
		self.reset(replacement);
		self.cloner = cloner;
		self.deleter = deleter;
	}
}

impl<T: ?Sized, C, D: Deleter<T>> Deref for ValuePtr<T, C, D> {
	type Target = T;

	/// # Panics
	///
	/// Iff `self` is null.
	#[track_caller]
	fn deref(&self) -> &Self::Target {
		match self.get() {
			Some(value) => value,
			None => null_dereference(),
		}
	}
}

impl<T: ?Sized, C, D: Deleter<T>> DerefMut for ValuePtr<T, C, D> {
	/// # Panics
	///
	/// Iff `self` is null.
	#[track_caller]
	fn deref_mut(&mut self) -> &mut Self::Target {
		match self.get_mut() {
			Some(value) => value,
			None => null_dereference(),
		}
	}
}

#[cold]
#[track_caller]
fn null_dereference() -> ! {
	panic!("`ValuePtr`: Tried to access the pointee of a null pointer.")
}

impl<T: ?Sized, C: Default, D: Deleter<T> + Default> From<Box<T>> for ValuePtr<T, C, D> {
	fn from(value: Box<T>) -> Self {
		Self::from_box_with(value, C::default(), D::default())
	}
}

impl<T: ?Sized, C, D: Deleter<T>> PartialEq for ValuePtr<T, C, D> {
	fn eq(&self, other: &Self) -> bool {
		self.address() == other.address()
	}
}

impl<T: ?Sized, C, D: Deleter<T>> Eq for ValuePtr<T, C, D> {}

impl<T: ?Sized, C, D: Deleter<T>> PartialOrd for ValuePtr<T, C, D> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<T: ?Sized, C, D: Deleter<T>> Ord for ValuePtr<T, C, D> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.address().cmp(&other.address())
	}
}

impl<T: ?Sized, C, D: Deleter<T>> Hash for ValuePtr<T, C, D> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.address().hash(state)
	}
}

impl<T: ?Sized + fmt::Debug, C, D: Deleter<T>> fmt::Debug for ValuePtr<T, C, D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.get() {
			Some(value) => f.debug_tuple("ValuePtr").field(&value).finish(),
			None => f.write_str("ValuePtr(null)"),
		}
	}
}

impl<T: ?Sized, C, D: Deleter<T>> fmt::Pointer for ValuePtr<T, C, D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Pointer::fmt(&self.address(), f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloc::vec::Vec;
	use core::cell::Cell;

	struct Counting<'a>(&'a Cell<usize>);
	impl Deleter<u8> for Counting<'_> {
		fn delete(&mut self, value: Box<u8>) {
			self.0.set(self.0.get() + 1);
			drop(value)
		}
	}

	#[test]
	fn pointer_sized() {
		assert_eq!(
			mem::size_of::<ValuePtr<Vec<u8>>>(),
			mem::size_of::<*const Vec<u8>>()
		);
		assert_eq!(mem::size_of::<ValuePtr<[u8]>>(), mem::size_of::<*const [u8]>());
	}

	#[test]
	fn reset_deletes_exactly_once() {
		let deleted = Cell::new(0);
		let mut ptr = ValuePtr::with_policies(1_u8, DefaultNew, Counting(&deleted));
		ptr.reset(Some(Box::new(2)));
		assert_eq!(deleted.get(), 1);
		assert_eq!(*ptr, 2);

		ptr.reset(None);
		assert_eq!(deleted.get(), 2);
		ptr.reset(None);
		assert_eq!(deleted.get(), 2);

		drop(ptr);
		assert_eq!(deleted.get(), 2);
	}

	#[test]
	fn release_bypasses_deleter() {
		let deleted = Cell::new(0);
		let mut ptr = ValuePtr::with_policies(7_u8, DefaultNew, Counting(&deleted));
		let released = ptr.release();
		assert_eq!(released.as_deref(), Some(&7));
		assert!(ptr.is_null());
		drop(ptr);
		assert_eq!(deleted.get(), 0);
	}

	#[test]
	fn null_address_is_null() {
		let ptr: ValuePtr<u8> = ValuePtr::null();
		assert!(ptr.address().is_null());
		assert!(ptr.as_ptr().is_null());
	}
}
