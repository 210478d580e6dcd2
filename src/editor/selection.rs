//! The transient set of highlighted points.
//!
//! ## Input tools and their policies
//!
//! Three tools feed the selection:
//!
//! - **Pick** ([`SelectionSet::pick`]): clicking a point toggles it; successive picks
//!   accumulate.
//! - **Lasso** ([`SelectionSet::lasso`]): the points inside a drawn outline *replace* the
//!   selection.
//! - **Legend checkbox** ([`SelectionSet::toggle_cluster`]): selects a whole cluster, or
//!   clears the selection if that cluster is already exactly what is selected.
//!
//! Note the asymmetry between pick and lasso. A user who picks a few points and then draws
//! a lasso loses the picked points: the lasso never extends a pick-built selection. This is
//! the established behaviour of the plot this editor drives and is kept as-is; callers that
//! want additive lassoing can use [`SelectionSet::add_all`] explicitly.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Which tool last changed the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Point-and-click on a single point.
    Pick,
    /// A drawn outline.
    Lasso,
    /// A legend checkbox.
    Legend,
}

/// A set of point indices bounded by the number of points.
///
/// Every mutating method checks all indices first and fails with [`Error::OutOfRange`]
/// without changing anything.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    len: usize,
    selected: BTreeSet<usize>,
    modality: Option<Modality>,
    revision: u64,
}

impl SelectionSet {
    /// An empty selection over `len` points.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    /// Number of selected points.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Out-of-range indices are simply not contained.
    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Borrow the selected indices, ascending.
    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    /// An owned copy of the selected indices.
    pub fn snapshot(&self) -> BTreeSet<usize> {
        self.selected.clone()
    }

    /// The tool that last changed the selection, if any.
    pub fn modality(&self) -> Option<Modality> {
        self.modality
    }

    /// Counter bumped whenever the selected set changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.revision += 1;
        }
    }

    /// Replace the selection wholesale.
    pub fn set(&mut self, indices: impl IntoIterator<Item = usize>) -> Result<()> {
        let incoming = self.checked(indices)?;
        self.replace(incoming);
        Ok(())
    }

    /// Add `index` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.check(index)?;
        let now_selected = if self.selected.remove(&index) {
            false
        } else {
            self.selected.insert(index);
            true
        };
        self.revision += 1;
        Ok(now_selected)
    }

    /// Union `indices` into the selection.
    pub fn add_all(&mut self, indices: impl IntoIterator<Item = usize>) -> Result<()> {
        let incoming = self.checked(indices)?;
        let before = self.selected.len();
        self.selected.extend(incoming);
        if self.selected.len() != before {
            self.revision += 1;
        }
        Ok(())
    }

    /// Pick tool: toggle one point, accumulating with earlier picks.
    pub fn pick(&mut self, index: usize) -> Result<bool> {
        let now_selected = self.toggle(index)?;
        self.modality = Some(Modality::Pick);
        Ok(now_selected)
    }

    /// Lasso tool: the enclosed points replace the selection, including any selection
    /// accumulated by picking (see the module docs).
    pub fn lasso(&mut self, indices: impl IntoIterator<Item = usize>) -> Result<()> {
        let incoming = self.checked(indices)?;
        if self.modality == Some(Modality::Pick) && !self.selected.is_empty() {
            tracing::debug!(
                discarded = self.selected.len(),
                "lasso replaces pick selection"
            );
        }
        self.replace(incoming);
        self.modality = Some(Modality::Lasso);
        Ok(())
    }

    /// Legend checkbox: select exactly `members`, or clear when they already are the whole
    /// selection. Returns whether the cluster is selected afterwards.
    pub fn toggle_cluster(&mut self, members: &BTreeSet<usize>) -> Result<bool> {
        if let Some(&index) = members.last() {
            self.check(index)?;
        }
        self.modality = Some(Modality::Legend);
        if !members.is_empty() && self.selected == *members {
            self.clear();
            Ok(false)
        } else {
            self.replace(members.clone());
            Ok(!members.is_empty())
        }
    }

    /// Whether every one of `members` is selected (legend checkbox "checked" state).
    pub fn covers(&self, members: &BTreeSet<usize>) -> bool {
        !members.is_empty() && members.is_subset(&self.selected)
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    fn checked(&self, indices: impl IntoIterator<Item = usize>) -> Result<BTreeSet<usize>> {
        let incoming: BTreeSet<usize> = indices.into_iter().collect();
        if let Some(&index) = incoming.last() {
            self.check(index)?;
        }
        Ok(incoming)
    }

    fn replace(&mut self, incoming: BTreeSet<usize>) {
        if self.selected != incoming {
            self.selected = incoming;
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut s = SelectionSet::new(5);
        assert!(s.toggle(3).unwrap());
        assert!(s.contains(3));
        assert!(!s.toggle(3).unwrap());
        assert!(s.is_empty());
    }

    #[test]
    fn out_of_range_changes_nothing() {
        let mut s = SelectionSet::new(3);
        s.set([0, 1]).unwrap();
        assert_eq!(s.set([1, 3]), Err(Error::OutOfRange { index: 3, len: 3 }));
        assert_eq!(s.add_all([9]), Err(Error::OutOfRange { index: 9, len: 3 }));
        assert_eq!(s.toggle(4), Err(Error::OutOfRange { index: 4, len: 3 }));
        assert!(s.lasso([2, 5]).is_err());
        assert_eq!(s.snapshot(), set(&[0, 1]));
        assert!(!s.contains(17));
    }

    #[test]
    fn picks_accumulate() {
        let mut s = SelectionSet::new(10);
        s.pick(1).unwrap();
        s.pick(4).unwrap();
        s.pick(7).unwrap();
        assert_eq!(s.snapshot(), set(&[1, 4, 7]));
        assert_eq!(s.modality(), Some(Modality::Pick));
    }

    #[test]
    fn lasso_after_picks_replaces() {
        let mut s = SelectionSet::new(10);
        s.pick(1).unwrap();
        s.pick(2).unwrap();
        s.lasso([5, 6]).unwrap();
        assert_eq!(s.snapshot(), set(&[5, 6]));
        assert_eq!(s.modality(), Some(Modality::Lasso));
    }

    #[test]
    fn add_all_extends() {
        let mut s = SelectionSet::new(10);
        s.set([1]).unwrap();
        s.add_all([2, 3]).unwrap();
        assert_eq!(s.snapshot(), set(&[1, 2, 3]));
    }

    #[test]
    fn cluster_checkbox_toggles() {
        let mut s = SelectionSet::new(10);
        let members = set(&[2, 3, 4]);

        s.pick(9).unwrap();
        assert!(s.toggle_cluster(&members).unwrap());
        assert_eq!(s.snapshot(), members);
        assert!(s.covers(&members));

        // Clicking again on an exactly-selected cluster clears.
        assert!(!s.toggle_cluster(&members).unwrap());
        assert!(s.is_empty());
        assert!(!s.covers(&members));
    }

    #[test]
    fn cluster_checkbox_replaces_superset() {
        let mut s = SelectionSet::new(10);
        let members = set(&[2, 3]);
        s.set([1, 2, 3]).unwrap();
        assert!(s.covers(&members));
        // Selection is a strict superset, not exactly the cluster: replace.
        assert!(s.toggle_cluster(&members).unwrap());
        assert_eq!(s.snapshot(), members);
    }

    #[test]
    fn revision_tracks_changes_only() {
        let mut s = SelectionSet::new(4);
        s.clear();
        assert_eq!(s.revision(), 0);
        s.set([1]).unwrap();
        s.set([1]).unwrap();
        assert_eq!(s.revision(), 1);
        s.add_all([1]).unwrap();
        assert_eq!(s.revision(), 1);
        s.clear();
        assert_eq!(s.revision(), 2);
    }
}
