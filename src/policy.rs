//! Cloning and deleting strategies for [`ValuePtr`](`crate::ValuePtr`).
//!
//! Both strategies are plain values stored inline in each handle.
//! Zero-sized strategies (like the defaults here) cost nothing, which keeps a [`ValuePtr`](`crate::ValuePtr`)
//! to a sized type exactly one pointer wide.

use alloc::boxed::Box;

/// Produces independent heap copies of a `T`.
///
/// This is what a [`ValuePtr`](`crate::ValuePtr`) calls whenever it is cloned.
///
/// # Polymorphic pointees
///
/// [`DefaultNew`] only implements this trait for [`Clone`] types, slices and [`str`].
/// Trait objects can't be cloned through their static type without losing the concrete value,
/// so a `ValuePtr<dyn Trait>` is only [`Clone`] with a custom [`Cloner`]:
///
/// ```
/// use value_ptr::{Cloner, DefaultDelete, ValuePtr};
///
/// trait Shape {
/// 	fn area(&self) -> f64;
/// 	fn boxed_clone(&self) -> Box<dyn Shape>;
/// }
///
/// #[derive(Clone)]
/// struct Square(f64);
/// impl Shape for Square {
/// 	fn area(&self) -> f64 {
/// 		self.0 * self.0
/// 	}
/// 	fn boxed_clone(&self) -> Box<dyn Shape> {
/// 		Box::new(self.clone())
/// 	}
/// }
///
/// #[derive(Clone, Copy, Default)]
/// struct ShapeCloner;
/// impl Cloner<dyn Shape> for ShapeCloner {
/// 	fn clone_boxed(&self, source: &dyn Shape) -> Box<dyn Shape> {
/// 		source.boxed_clone()
/// 	}
/// }
///
/// let square = ValuePtr::new(Square(2.0));
/// let shape: ValuePtr<dyn Shape, ShapeCloner, DefaultDelete> =
/// 	square.convert(|square| square as Box<dyn Shape>, ShapeCloner, DefaultDelete);
/// let copy = shape.clone();
/// assert_eq!(copy.area(), 4.0);
/// assert!(copy != shape);
/// ```
///
/// Without `ShapeCloner`, the `.clone()` above does not compile:
///
/// ```compile_fail
/// use value_ptr::ValuePtr;
///
/// trait Shape {}
/// struct Square;
/// impl Shape for Square {}
///
/// let square: Box<dyn Shape> = Box::new(Square);
/// let shape: ValuePtr<dyn Shape> = ValuePtr::from_box(square);
/// let copy = shape.clone();
/// ```
pub trait Cloner<T: ?Sized> {
	/// Allocates a new copy of `source` that shares nothing with it.
	fn clone_boxed(&self, source: &T) -> Box<T>;
}

/// Releases the allocation owned by a [`ValuePtr`](`crate::ValuePtr`).
///
/// Called exactly once for each pointee a handle gives up through dropping, [`reset`](`crate::ValuePtr::reset`) or reassignment.
/// It is **not** called for pointees handed out by [`release`](`crate::ValuePtr::release`).
pub trait Deleter<T: ?Sized> {
	/// Disposes of `value`.
	fn delete(&mut self, value: Box<T>);
}

/// The default [`Cloner`]: [`Clone`]s into a fresh [`Box`].
///
/// This covers fixed-size arrays (`[T; N]` is [`Clone`]) and clones slices element-wise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefaultNew;

impl<T: Clone> Cloner<T> for DefaultNew {
	fn clone_boxed(&self, source: &T) -> Box<T> {
		Box::new(source.clone())
	}
}

impl<T: Clone> Cloner<[T]> for DefaultNew {
	fn clone_boxed(&self, source: &[T]) -> Box<[T]> {
		source.into()
	}
}

impl Cloner<str> for DefaultNew {
	fn clone_boxed(&self, source: &str) -> Box<str> {
		source.into()
	}
}

/// Any `Fn(&T) -> Box<T>` can clone `T`s.
impl<T: ?Sized, F> Cloner<T> for F
where
	F: Fn(&T) -> Box<T>,
{
	fn clone_boxed(&self, source: &T) -> Box<T> {
		self(source)
	}
}

/// The default [`Deleter`]: drops the [`Box`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefaultDelete;

impl<T: ?Sized> Deleter<T> for DefaultDelete {
	fn delete(&mut self, value: Box<T>) {
		drop(value)
	}
}

/// Any `FnMut(Box<T>)` can delete `T`s.
impl<T: ?Sized, F> Deleter<T> for F
where
	F: FnMut(Box<T>),
{
	fn delete(&mut self, value: Box<T>) {
		self(value)
	}
}
