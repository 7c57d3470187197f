//! Ordered associative containers backed by a parent-linked binary search
//! tree.
//!
//! Three containers share one tree engine:
//!
//! * [`Map`] associates unique keys with values.
//! * [`Set`] stores unique keys.
//! * [`Multiset`] stores keys, keeping every duplicate.
//!
//! All three are ordered by a [`Compare`] implementation, defaulting to the
//! key's [`Ord`] implementation via [`Less`].
//!
//! Besides the usual iterators, elements can be addressed by [`Position`], a
//! copyable cursor that can be stepped forwards and backwards, used as the
//! bounds of a range, or passed back to erase a single element. A position
//! stays valid until its own element is removed; afterwards it is reported as
//! stale instead of aliasing a new element. Positions are tied to the
//! container that issued them and are rejected by any other.
//!
//! ```
//! use ordtree::Multiset;
//!
//! let mut s = Multiset::from([111, 222, 222, 333]);
//!
//! let (lo, hi) = s.equal_range(&222);
//! assert_eq!(s.span(lo, hi).unwrap().count(), 2);
//!
//! // Erase one of the duplicates through its position.
//! s.erase(lo).unwrap();
//! assert_eq!(s.count(&222), 1);
//! ```
//!
//! The tree is not self-balancing. Insertion order determines its height,
//! and operations take time proportional to that height.
//!
//! # Features
//!
//! * `serde`: [`Serialize`] and [`Deserialize`] implementations for all
//!   containers.
//!
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

#![deny(rust_2018_idioms, missing_debug_implementations, unsafe_code)]
#![warn(clippy::all)]

mod compare;
mod entry;
mod error;
mod iter;
pub mod map;
pub mod multiset;
mod node;
mod position;
pub mod set;
mod tree;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
mod test_utils;

pub use compare::*;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::*;
pub use map::Map;
pub use multiset::Multiset;
pub use position::Position;
pub use set::Set;
