//! Backing storage strategies for [`FlatMap`](`crate::FlatMap`).

use crate::{MovingVec, ValuePtr};
use alloc::vec::Vec;

pub(crate) mod sealed {
	use alloc::vec::Vec;

	/// Slot-level access to a [`Storage`](`super::Storage`).
	///
	/// A slot is whatever the storage keeps in its backing [`Vec`]: the element itself, or a handle to it.
	/// Moving a slot never invalidates references into a handle's pointee.
	pub trait Slots<T> {
		type Slot;

		fn slots(&self) -> &[Self::Slot];
		fn slots_mut(&mut self) -> &mut Vec<Self::Slot>;
		fn into_slots(self) -> Vec<Self::Slot>;
		fn slot_capacity(&self) -> usize;

		fn slot(value: T) -> Self::Slot;
		fn unslot(slot: Self::Slot) -> T;
		fn value(slot: &Self::Slot) -> &T;
		fn value_mut(slot: &mut Self::Slot) -> &mut T;
	}
}

/// A sequence that a [`FlatMap`](`crate::FlatMap`) can keep its entries in.
///
/// This trait is sealed. It is implemented by:
///
/// - [`Vec<T>`]: Direct storage. Fast, but any insertion or removal may move every element.
/// - [`MovingVec<T>`]: Indirect storage. Elements keep their address until they are removed.
pub trait Storage<T>: sealed::Slots<T> + Default {}

impl<T> Storage<T> for Vec<T> {}
impl<T> Storage<T> for MovingVec<T> {}

impl<T> sealed::Slots<T> for Vec<T> {
	type Slot = T;

	fn slots(&self) -> &[T] {
		self
	}

	fn slots_mut(&mut self) -> &mut Vec<T> {
		self
	}

	fn into_slots(self) -> Vec<T> {
		self
	}

	fn slot_capacity(&self) -> usize {
		self.capacity()
	}

	fn slot(value: T) -> T {
		value
	}

	fn unslot(slot: T) -> T {
		slot
	}

	fn value(slot: &T) -> &T {
		slot
	}

	fn value_mut(slot: &mut T) -> &mut T {
		slot
	}
}

impl<T> sealed::Slots<T> for MovingVec<T> {
	type Slot = ValuePtr<T>;

	fn slots(&self) -> &[ValuePtr<T>] {
		&self.slots
	}

	// Callers must not store null handles.
	fn slots_mut(&mut self) -> &mut Vec<ValuePtr<T>> {
		&mut self.slots
	}

	fn into_slots(self) -> Vec<ValuePtr<T>> {
		self.slots
	}

	fn slot_capacity(&self) -> usize {
		self.slots.capacity()
	}

	fn slot(value: T) -> ValuePtr<T> {
		ValuePtr::new(value)
	}

	#[track_caller]
	fn unslot(slot: ValuePtr<T>) -> T {
		slot.into_value()
	}

	#[track_caller]
	fn value(slot: &ValuePtr<T>) -> &T {
		slot
	}

	#[track_caller]
	fn value_mut(slot: &mut ValuePtr<T>) -> &mut T {
		slot
	}
}
