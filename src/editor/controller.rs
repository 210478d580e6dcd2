//! UI-facing actions.
//!
//! [`EditController`] borrows the pieces of a [`Session`](super::Session) for the duration
//! of one user event and applies that event to them: selection tools, split, merge,
//! rename, recolor and the two-step view reset. After every partition edit the selection
//! is cleared and the legend is rebuilt before control returns to the caller, so the
//! renderer only ever sees consistent state.
//!
//! Error policy: an empty selection is something the UI should have prevented (the
//! actions are disabled, see [`EditController::can_split`]), so split and merge on an empty
//! selection are logged no-ops. A stale or unknown cluster id, or an out-of-range point
//! index, is a real integration bug and is returned as an error.

use std::collections::BTreeSet;

use super::legend::LegendModel;
use super::palette::Color;
use super::params::EditorParams;
use super::partition::{ClusterId, EditOutcome, Partition};
use super::points::PointStore;
use super::selection::SelectionSet;
use super::traits::ViewTransform;
use crate::error::{Error, Result};

/// What [`EditController::reset_view`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The selection was non-empty and has been cleared; the view is untouched.
    SelectionCleared,
    /// Nothing was selected, so the view transform was reset.
    ViewReset,
}

/// Applies user actions to a session's partition, selection and legend.
#[derive(Debug)]
pub struct EditController<'a> {
    pub(crate) points: &'a PointStore,
    pub(crate) partition: &'a mut Partition,
    pub(crate) selection: &'a mut SelectionSet,
    pub(crate) legend: &'a mut LegendModel,
    pub(crate) params: &'a EditorParams,
}

impl EditController<'_> {
    /// Whether "new label from selection" should be enabled.
    pub fn can_split(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Whether merging the selection into `target` should be enabled.
    pub fn can_merge(&self, target: ClusterId) -> bool {
        !self.selection.is_empty() && self.partition.contains(target)
    }

    /// Move the selected points into a new cluster.
    ///
    /// Returns the new cluster, or `None` when nothing was selected.
    pub fn perform_split(&mut self) -> Result<Option<ClusterId>> {
        if self.selection.is_empty() {
            tracing::debug!("split ignored: empty selection");
            return Ok(None);
        }
        let outcome = self.partition.split(self.selection.indices())?;
        self.finish_edit(&outcome);
        Ok(Some(outcome.cluster))
    }

    /// Move the selected points into `target`.
    ///
    /// Returns `false` when nothing was selected. Merging into the points' own cluster is a
    /// successful no-op that still clears the selection.
    pub fn perform_merge(&mut self, target: ClusterId) -> Result<bool> {
        if self.selection.is_empty() {
            tracing::debug!(cluster = %target, "merge ignored: empty selection");
            return Ok(false);
        }
        let outcome = self
            .partition
            .merge(self.selection.indices(), target)
            .inspect_err(report)?;
        self.finish_edit(&outcome);
        Ok(true)
    }

    /// Rename a cluster through the legend.
    pub fn rename(&mut self, id: ClusterId, name: impl Into<String>) -> Result<()> {
        self.legend
            .on_rename(self.partition, id, name)
            .inspect_err(report)
    }

    /// Recolor a cluster through the legend.
    pub fn recolor(&mut self, id: ClusterId, color: Color) -> Result<()> {
        self.legend
            .on_recolor(self.partition, id, color)
            .inspect_err(report)
    }

    /// First press clears the selection; a press with nothing selected resets the view.
    pub fn reset_view<V: ViewTransform + ?Sized>(&mut self, view: &mut V) -> ResetOutcome {
        if self.selection.is_empty() {
            view.reset();
            ResetOutcome::ViewReset
        } else {
            self.selection.clear();
            ResetOutcome::SelectionCleared
        }
    }

    /// Pick tool at data coordinates: toggles the nearest point within the pick radius.
    ///
    /// Returns the toggled point, or `None` on a miss (selection unchanged).
    pub fn pick_at(&mut self, x: f32, y: f32) -> Result<Option<usize>> {
        match self.points.nearest_within(x, y, self.params.pick_radius) {
            Some(index) => {
                self.selection.pick(index)?;
                Ok(Some(index))
            }
            None => {
                tracing::debug!(x, y, radius = self.params.pick_radius, "pick missed");
                Ok(None)
            }
        }
    }

    /// Pick tool on a point the renderer already hit-tested.
    pub fn pick(&mut self, index: usize) -> Result<bool> {
        self.selection.pick(index).inspect_err(report)
    }

    /// Lasso tool with a polygon in data coordinates. Replaces the selection.
    ///
    /// Returns the number of points now selected.
    pub fn lasso(&mut self, polygon: &[(f32, f32)]) -> Result<usize> {
        let inside = self.points.inside_polygon(polygon);
        self.selection.lasso(inside)?;
        Ok(self.selection.len())
    }

    /// Lasso tool on indices the renderer already hit-tested. Replaces the selection.
    pub fn lasso_indices(&mut self, indices: impl IntoIterator<Item = usize>) -> Result<()> {
        self.selection.lasso(indices).inspect_err(report)
    }

    /// Legend checkbox for `id`. Returns whether the cluster is selected afterwards.
    ///
    /// A no-op returning `false` when the legend is not selectable.
    pub fn toggle_cluster_selection(&mut self, id: ClusterId) -> Result<bool> {
        if !self.legend.selectable() {
            tracing::debug!(cluster = %id, "legend selection disabled");
            return Ok(false);
        }
        let members: &BTreeSet<usize> = self.partition.members_of(id).inspect_err(report)?;
        self.selection.toggle_cluster(members)
    }

    fn finish_edit(&mut self, outcome: &EditOutcome) {
        self.selection.clear();
        self.legend.refresh(self.partition);
        if !outcome.retired.is_empty() {
            tracing::debug!(retired = ?outcome.retired, "legend rows removed");
        }
    }
}

fn report(err: &Error) {
    match err {
        Error::UnknownCluster(id) => {
            tracing::warn!(cluster = %id, "action on unknown or retired cluster");
        }
        Error::OutOfRange { index, len } => {
            tracing::error!(index, len, "point index out of range");
        }
        _ => {}
    }
}
