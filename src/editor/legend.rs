//! The legend: a derived, ordered view of the partition's live clusters.

use serde::{Deserialize, Serialize};

use super::palette::Color;
use super::partition::{ClusterId, Partition};
use super::selection::SelectionSet;
use crate::error::Result;

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Cluster this row describes.
    pub id: ClusterId,
    /// Current display name.
    pub name: String,
    /// Current color.
    pub color: Color,
    /// Number of points in the cluster.
    pub member_count: usize,
}

/// Legend rows, always recomputed from a [`Partition`] and never edited directly.
///
/// Rows follow the partition's cluster order: clusters present at start-up keep their
/// relative order and split clusters are appended.
#[derive(Debug, Clone, Default)]
pub struct LegendModel {
    entries: Vec<LegendEntry>,
    selectable: bool,
}

impl LegendModel {
    /// Derive the legend for `partition`.
    pub fn new(partition: &Partition, selectable: bool) -> Self {
        let mut legend = Self {
            entries: Vec::new(),
            selectable,
        };
        legend.refresh(partition);
        legend
    }

    /// Rows in legend order.
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Number of rows (live clusters).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no clusters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether rows carry a "select this cluster" checkbox.
    pub fn selectable(&self) -> bool {
        self.selectable
    }

    /// Row for `id`, if it is live.
    pub fn entry(&self, id: ClusterId) -> Option<&LegendEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Row index of `id`, if it is live.
    pub fn position(&self, id: ClusterId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Rebuild every row from the partition.
    pub fn refresh(&mut self, partition: &Partition) {
        self.entries = Self::derive(partition);
    }

    /// Rename through the legend's text box.
    pub fn on_rename(
        &mut self,
        partition: &mut Partition,
        id: ClusterId,
        name: impl Into<String>,
    ) -> Result<()> {
        partition.set_display_name(id, name)?;
        self.refresh(partition);
        Ok(())
    }

    /// Recolor through the legend's color picker.
    pub fn on_recolor(
        &mut self,
        partition: &mut Partition,
        id: ClusterId,
        color: Color,
    ) -> Result<()> {
        partition.set_color(id, color)?;
        self.refresh(partition);
        Ok(())
    }

    /// Checkbox state per row: checked when every member of the cluster is selected.
    pub fn checked(
        &self,
        partition: &Partition,
        selection: &SelectionSet,
    ) -> Vec<(ClusterId, bool)> {
        self.entries
            .iter()
            .map(|e| {
                let on = partition
                    .members_of(e.id)
                    .is_ok_and(|members| selection.covers(members));
                (e.id, on)
            })
            .collect()
    }

    /// True when the rows equal a fresh derivation from `partition`.
    pub fn is_synced_with(&self, partition: &Partition) -> bool {
        self.entries == Self::derive(partition)
    }

    fn derive(partition: &Partition) -> Vec<LegendEntry> {
        partition
            .ids()
            .iter()
            .filter_map(|&id| {
                Some(LegendEntry {
                    id,
                    name: partition.display_name(id).ok()?.to_string(),
                    color: partition.color(id).ok()?,
                    member_count: partition.member_count(id).ok()?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn rows_follow_partition_order() {
        let p = Partition::new(5, &["b", "a", "b", "c", "a"]).unwrap();
        let legend = LegendModel::new(&p, true);
        let rows: Vec<(&str, usize)> = legend
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.member_count))
            .collect();
        assert_eq!(rows, vec![("b", 2), ("a", 2), ("c", 1)]);
        assert!(legend.is_synced_with(&p));
    }

    #[test]
    fn split_clusters_are_appended_and_retired_rows_dropped() {
        let mut p = Partition::new(4, &["a", "a", "b", "b"]).unwrap();
        let mut legend = LegendModel::new(&p, true);
        let b = p.ids()[1];

        let out = p.split(&BTreeSet::from([2, 3])).unwrap();
        assert!(!legend.is_synced_with(&p));
        legend.refresh(&p);

        assert_eq!(legend.len(), 2);
        assert_eq!(legend.position(out.cluster), Some(1));
        assert!(legend.entry(b).is_none());
    }

    #[test]
    fn rename_and_recolor_refresh() {
        let mut p = Partition::new(2, &["a", "b"]).unwrap();
        let mut legend = LegendModel::new(&p, false);
        let a = p.ids()[0];

        legend.on_rename(&mut p, a, "apples").unwrap();
        assert_eq!(legend.entry(a).unwrap().name, "apples");

        let teal = Color::rgb(0, 128, 128);
        legend.on_recolor(&mut p, a, teal).unwrap();
        assert_eq!(legend.entry(a).unwrap().color, teal);
        assert!(legend.is_synced_with(&p));
        assert!(!legend.selectable());
    }

    #[test]
    fn checkbox_state_from_selection() {
        let p = Partition::new(4, &["a", "a", "b", "b"]).unwrap();
        let legend = LegendModel::new(&p, true);
        let mut s = SelectionSet::new(4);
        s.set([0, 1, 2]).unwrap();

        let states: Vec<bool> = legend
            .checked(&p, &s)
            .into_iter()
            .map(|(_, on)| on)
            .collect();
        assert_eq!(states, vec![true, false]);

        s.set(BTreeSet::new()).unwrap();
        assert!(legend.checked(&p, &s).iter().all(|&(_, on)| !on));
    }

    #[test]
    fn entries_serialize_for_front_ends() {
        let p = Partition::new(1, &["only"]).unwrap();
        let legend = LegendModel::new(&p, true);
        let json = serde_json::to_value(legend.entries()).unwrap();
        assert_eq!(json[0]["id"], 0);
        assert_eq!(json[0]["name"], "only");
        assert_eq!(json[0]["color"], "#1f77b4");
        assert_eq!(json[0]["member_count"], 1);
    }
}
