//! Interactive editing of cluster labels on a 2D point cloud.
//!
//! ## Pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`PointStore`] | the fixed points: coordinates, hover text, hit testing |
//! | [`Partition`] | which cluster every point is in; split, merge, rename, recolor |
//! | [`SelectionSet`] | the points currently highlighted |
//! | [`LegendModel`] | ordered `(id, name, color, count)` rows derived from the partition |
//! | [`EditController`] | applies one user action to the above |
//! | [`Session`] | owns all of it; the entry point |
//!
//! Data flows one way: an input event updates the selection, an action (split, merge)
//! may then rewrite the partition, and the legend is recomputed from the partition. A
//! renderer reads the four pieces and draws.
//!
//! ## Split and merge
//!
//! **Split** moves the selected points, from however many clusters, into a fresh cluster.
//! **Merge** moves them into an existing cluster. Either way a cluster left with no points
//! is deleted on the spot and its id is never handed out again.
//!
//! ## Usage
//!
//! ```rust
//! use labelkit::editor::{ResetOutcome, Session, ViewTransform};
//!
//! struct Camera { zoom: f32 }
//! impl ViewTransform for Camera {
//!     fn reset(&mut self) { self.zoom = 1.0; }
//! }
//!
//! let coords = vec![(0.0, 0.0), (0.1, 0.0), (5.0, 5.0), (5.1, 5.0)];
//! let mut session = Session::create(coords, &["a", "a", "a", "a"], None).unwrap();
//!
//! // Lasso the two points near (5, 5) and split them off.
//! let mut ctl = session.controller();
//! ctl.lasso(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]).unwrap();
//! let fresh = ctl.perform_split().unwrap().unwrap();
//!
//! assert_eq!(session.legend().len(), 2);
//! assert_eq!(session.labels_by_index(), ["a", "a", "new_label_1", "new_label_1"]);
//!
//! // Put them back: the split cluster empties and disappears.
//! let a = session.legend().entries()[0].id;
//! let mut ctl = session.controller();
//! ctl.toggle_cluster_selection(fresh).unwrap();
//! ctl.perform_merge(a).unwrap();
//! assert_eq!(session.legend().len(), 1);
//!
//! // Nothing selected: reset goes through to the view.
//! let mut camera = Camera { zoom: 3.0 };
//! assert_eq!(session.controller().reset_view(&mut camera), ResetOutcome::ViewReset);
//! assert_eq!(camera.zoom, 1.0);
//! ```

mod controller;
mod legend;
mod palette;
mod params;
mod partition;
mod points;
mod selection;
mod session;
mod traits;
mod util;

pub use controller::{EditController, ResetOutcome};
pub use legend::{LegendEntry, LegendModel};
pub use palette::{Color, Palette, MAX_PALETTE_LENGTH, PALETTE_NAMES};
pub use params::EditorParams;
pub use partition::{ClusterId, EditOutcome, Partition};
pub use points::PointStore;
pub use selection::{Modality, SelectionSet};
pub use session::{Session, SessionBuilder};
pub use traits::ViewTransform;
