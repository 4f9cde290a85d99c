//! Failures of the bounds-checked `at` accessors.

use thiserror::Error;

/// Returned by bounds-checked accessors like [`MovingVec::at`](`crate::MovingVec::at`)
/// and [`FlatMap::at`](`crate::FlatMap::at`).
///
/// Other lookups return [`None`] instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutOfRange {
	/// The index was not less than the length.
	#[error("index {index} is out of range for length {len}")]
	Index {
		/// The requested index.
		index: usize,
		/// The length at the time of the access.
		len: usize,
	},

	/// No entry with an equivalent key exists.
	#[error("key not found")]
	Key,
}
