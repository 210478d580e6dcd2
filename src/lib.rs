//! Interactive cluster-label editing.
//!
//! `labelkit` is the state machine behind a "label editor" for a labeled 2D point cloud:
//! a fixed set of points, a user-editable partition of those points into named, colored
//! clusters, a transient selection, and a legend derived from the partition.
//!
//! The primary public API is under [`editor`], which provides:
//! - [`Session`] construction from coordinates + initial labels
//! - selection tools (pick, lasso, legend checkbox)
//! - split / merge / rename / recolor through [`EditController`]
//!
//! Rendering, embedding and persistence are left to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod editor;
pub mod error;

pub use editor::{
    ClusterId, Color, EditController, EditOutcome, EditorParams, LegendEntry, LegendModel,
    Modality, Palette, Partition, PointStore, ResetOutcome, SelectionSet, Session,
    SessionBuilder, ViewTransform,
};
pub use error::{Error, Result};
