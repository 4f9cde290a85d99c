//! A deep-copying owning pointer, an address-stable vector built from it, and a sorted flat map over either storage.
//!
//! - [`ValuePtr`] is a nullable [`Box`](`alloc::boxed::Box`) with value semantics:
//!   Cloning it clones the pointee through a pluggable [`Cloner`], dropping it goes through a pluggable [`Deleter`].
//! - [`MovingVec`] keeps each element in its own [`ValuePtr`], so **elements never move** while in the container,
//!   and insertions, removals and sorts only shift pointers.
//! - [`FlatMap`] is a sorted unique-key map backed by either a [`MovingVec`] ([`StableFlatMap`])
//!   or a plain [`Vec`](`alloc::vec::Vec`) ([`UnstableFlatMap`]).
//! - [`ForwardList`] is a singly linked list whose links are [`ValuePtr`]s.
//!
//! # Performance Focus
//!
//! The flat map is optimised for relatively small maps that are read more often than they are changed.
//! Lookups are binary searches over one contiguous sequence, but each insertion or removal shifts everything after it.
#![no_std]
#![doc(html_root_url = "https://docs.rs/value-ptr/0.0.1")]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::semicolon_if_nothing_returned)]

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
mod readme {}

extern crate alloc;

#[cfg(test)]
extern crate std;

mod compare;
mod error;
pub mod flat_map;
pub mod forward_list;
pub mod moving_vec;
mod policy;
mod ptr;
mod storage;

pub use compare::{Compare, Greater, Less};
pub use error::OutOfRange;
pub use flat_map::{FlatMap, StableFlatMap, UnstableFlatMap};
pub use forward_list::ForwardList;
pub use moving_vec::MovingVec;
pub use policy::{Cloner, DefaultDelete, DefaultNew, Deleter};
pub use ptr::ValuePtr;
pub use storage::Storage;
