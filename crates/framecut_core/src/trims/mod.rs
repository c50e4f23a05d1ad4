//! Frame range handling.
//!
//! Trims follow slice syntax: `(3, 22)` keeps frames 3 through 21,
//! negative indices count from the end and an unset index is an open
//! boundary.
//!
//! # Pipeline
//!
//! 1. [`normalize_many`] resolves indices against the frame count
//! 2. [`validate_ordered`] checks ordering, overlap and emptiness
//! 3. [`merge_adjacent`] / [`merge_touching`] join touching ranges
//!
//! # Usage
//!
//! ```
//! use framecut_core::trims::{merge_touching, normalize_many, validate_ordered};
//!
//! let (starts, ends) = normalize_many(100, &[3i64, -10], &[22i64, 0]).unwrap();
//! assert_eq!((starts.clone(), ends.clone()), (vec![3, 90], vec![22, 100]));
//! assert!(validate_ordered(&starts, &ends).is_ok());
//!
//! let (starts, ends) = merge_touching(&[0, 5, 9], &[4, 8, 11]).unwrap();
//! assert_eq!((starts, ends), (vec![0], vec![12]));
//! ```

mod merge;
mod normalize;
mod types;
mod validate;

pub use merge::{merge_adjacent, merge_touching};
pub use normalize::{normalize, normalize_many, normalize_trims};
pub use types::{unzip_trims, zip_trims, FrameIndex, Trim, TrimSpec};
pub use validate::{validate_ordered, validate_ordered_with, validate_trims, OrderReport, TouchPolicy};
