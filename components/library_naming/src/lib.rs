// components/library_naming/src/lib.rs
//! Deterministic names for a generated music library
//!
//! Track indices map onto artist, album and title names built from
//! spreadsheet-column letters (A, B, ..., Z, AA, AB, ...). Names never
//! collide within a category and sort in index order.
//!
//! # Examples
//!
//! ```
//! use library_naming::Shape;
//!
//! let attributes = Shape::default().resolve(30);
//! assert_eq!(attributes.artist, "B");
//! assert_eq!(attributes.album, "A");
//! assert_eq!(attributes.track_number, 1);
//! ```

mod attributes;
mod letters;

pub use attributes::{ResolvedAttributes, Shape, ShapeError, PATH_COMPONENTS};
pub use letters::{letter_name, pad, repetitions};
