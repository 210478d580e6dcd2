//! The editable assignment of points to clusters.
//!
//! A [`Partition`] is a total map `point index -> ClusterId` over a fixed number of points,
//! together with the live clusters (name, color, members). Three invariants hold after
//! every public method returns:
//!
//! - every point belongs to exactly one live cluster;
//! - every live cluster has at least one member (a cluster emptied by an edit is deleted
//!   inside that same edit, never in a later cleanup pass);
//! - cluster ids come from a monotonically increasing counter and are never re-issued,
//!   so a renderer holding on to a retired id cannot silently alias a newer cluster.
//!
//! Mutating operations validate every precondition before touching any state, so a failed
//! call leaves the partition exactly as it was.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::palette::{Color, Palette};
use super::params::DEFAULT_NEW_LABEL_PREFIX;
use crate::error::{Error, Result};

/// Stable, opaque cluster identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(u64);

impl ClusterId {
    /// The raw counter value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Cluster {
    name: String,
    color: Color,
    members: BTreeSet<usize>,
}

/// What a split or merge did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The cluster the selection now belongs to: the new cluster for a split, the target
    /// for a merge.
    pub cluster: ClusterId,
    /// Number of points whose cluster changed.
    pub moved: usize,
    /// Clusters deleted because the edit left them empty, in legend order.
    pub retired: Vec<ClusterId>,
}

impl EditOutcome {
    /// True when nothing moved (e.g. merging points into their own cluster).
    pub fn is_noop(&self) -> bool {
        self.moved == 0
    }
}

/// Assignment of every point to exactly one live cluster.
#[derive(Debug, Clone)]
pub struct Partition {
    assignment: Vec<ClusterId>,
    clusters: HashMap<ClusterId, Cluster>,
    /// Live ids in legend order: initial clusters first, then split clusters as created.
    order: Vec<ClusterId>,
    next_id: u64,
    palette: Palette,
    new_label_prefix: String,
    new_label_count: usize,
    revision: u64,
}

impl Partition {
    /// Group `n` points by their initial label, one fresh cluster per distinct label.
    ///
    /// Clusters are ordered by first appearance in `labels` and colored from the default
    /// palette.
    pub fn new<S: AsRef<str>>(n: usize, labels: &[S]) -> Result<Self> {
        let no_factors: &[&str] = &[];
        Self::with_options(
            n,
            labels,
            no_factors,
            Palette::default(),
            DEFAULT_NEW_LABEL_PREFIX,
        )
    }

    /// Like [`Partition::new`], with an explicit legend order and palette.
    ///
    /// Labels listed in `factors` come first, in that order (factors that no point carries
    /// are skipped); any remaining labels follow in first-seen order. The cluster at legend
    /// position `k` takes palette color `k`. Clusters created later by [`Partition::split`]
    /// are named `{new_label_prefix}{count}` with a per-partition count starting at 1.
    pub fn with_options<S: AsRef<str>, F: AsRef<str>>(
        n: usize,
        labels: &[S],
        factors: &[F],
        mut palette: Palette,
        new_label_prefix: impl Into<String>,
    ) -> Result<Self> {
        if labels.len() != n {
            return Err(Error::LengthMismatch {
                what: "labels",
                expected: n,
                found: labels.len(),
            });
        }

        let present: HashSet<&str> = labels.iter().map(|l| l.as_ref()).collect();
        let mut seen: HashSet<&str> = HashSet::with_capacity(present.len());
        let mut names: Vec<&str> = Vec::with_capacity(present.len());
        let factor_names = factors
            .iter()
            .map(|f| f.as_ref())
            .filter(|f| present.contains(f));
        for name in factor_names.chain(labels.iter().map(|l| l.as_ref())) {
            if seen.insert(name) {
                names.push(name);
            }
        }

        palette.extend_to(names.len());

        let mut partition = Self {
            assignment: Vec::with_capacity(n),
            clusters: HashMap::with_capacity(names.len()),
            order: Vec::with_capacity(names.len()),
            next_id: 0,
            palette,
            new_label_prefix: new_label_prefix.into(),
            new_label_count: 1,
            revision: 0,
        };

        let mut by_name: HashMap<&str, ClusterId> = HashMap::with_capacity(names.len());
        for (pos, &name) in names.iter().enumerate() {
            // Past the 24-bit limit colors repeat.
            let color = partition.palette.colors()[pos % partition.palette.len()];
            let id = partition.allocate(name.to_string(), color);
            by_name.insert(name, id);
        }

        for (i, label) in labels.iter().enumerate() {
            let id = by_name[label.as_ref()];
            partition.assignment.push(id);
            if let Some(cluster) = partition.clusters.get_mut(&id) {
                cluster.members.insert(i);
            }
        }

        Ok(partition)
    }

    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.assignment.len()
    }

    /// Number of live clusters.
    pub fn cluster_count(&self) -> usize {
        self.order.len()
    }

    /// Live cluster ids in legend order.
    pub fn ids(&self) -> &[ClusterId] {
        &self.order
    }

    /// Whether `id` names a live cluster.
    pub fn contains(&self, id: ClusterId) -> bool {
        self.clusters.contains_key(&id)
    }

    /// Cluster id of every point, by point index.
    pub fn assignment(&self) -> &[ClusterId] {
        &self.assignment
    }

    /// Cluster of point `index`.
    pub fn cluster_of(&self, index: usize) -> Result<ClusterId> {
        self.assignment
            .get(index)
            .copied()
            .ok_or(Error::OutOfRange {
                index,
                len: self.assignment.len(),
            })
    }

    /// Points in cluster `id`, ascending.
    pub fn members_of(&self, id: ClusterId) -> Result<&BTreeSet<usize>> {
        Ok(&self.cluster(id)?.members)
    }

    /// Number of points in cluster `id`.
    pub fn member_count(&self, id: ClusterId) -> Result<usize> {
        Ok(self.cluster(id)?.members.len())
    }

    /// Display name of cluster `id`.
    pub fn display_name(&self, id: ClusterId) -> Result<&str> {
        Ok(&self.cluster(id)?.name)
    }

    /// Rename a cluster. Names need not be unique; two clusters with the same name stay
    /// two clusters.
    pub fn set_display_name(&mut self, id: ClusterId, name: impl Into<String>) -> Result<()> {
        let cluster = self.cluster_mut(id)?;
        let name = name.into();
        if cluster.name != name {
            cluster.name = name;
            self.revision += 1;
        }
        Ok(())
    }

    /// Color of cluster `id`.
    pub fn color(&self, id: ClusterId) -> Result<Color> {
        Ok(self.cluster(id)?.color)
    }

    /// Recolor a cluster.
    pub fn set_color(&mut self, id: ClusterId, color: Color) -> Result<()> {
        let cluster = self.cluster_mut(id)?;
        if cluster.color != color {
            cluster.color = color;
            self.revision += 1;
        }
        Ok(())
    }

    /// The palette split clusters take their colors from.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Counter bumped by every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current display name of each point's cluster, in point index order.
    pub fn labels_by_index(&self) -> Vec<String> {
        self.assignment
            .iter()
            .map(|id| self.clusters[id].name.clone())
            .collect()
    }

    /// Move `selection` into a brand-new cluster and return it.
    ///
    /// Points may come from any number of source clusters; sources left empty are
    /// deleted. The new cluster is named from the label prefix and counter and takes the
    /// first palette color no live cluster uses.
    pub fn split(&mut self, selection: &BTreeSet<usize>) -> Result<EditOutcome> {
        if selection.is_empty() {
            return Err(Error::EmptySelection);
        }
        self.validate(selection)?;

        let used: HashSet<Color> = self.clusters.values().map(|c| c.color).collect();
        let color = self.palette.next_unused(&used);
        let name = self.fresh_name();

        let id = self.allocate(name, color);
        let (moved, retired) = self.reassign(selection, id);
        self.revision += 1;

        tracing::info!(
            cluster = %id,
            moved,
            retired = ?retired,
            clusters = self.order.len(),
            "split selection into new cluster"
        );
        Ok(EditOutcome {
            cluster: id,
            moved,
            retired,
        })
    }

    /// Move `selection` into the existing cluster `target`.
    ///
    /// Source clusters other than `target` that end up empty are deleted. Points already
    /// in `target` stay put, so merging a selection into its own cluster changes nothing.
    pub fn merge(
        &mut self,
        selection: &BTreeSet<usize>,
        target: ClusterId,
    ) -> Result<EditOutcome> {
        if !self.contains(target) {
            return Err(Error::UnknownCluster(target));
        }
        if selection.is_empty() {
            return Err(Error::EmptySelection);
        }
        self.validate(selection)?;

        let (moved, retired) = self.reassign(selection, target);
        if moved > 0 {
            self.revision += 1;
            tracing::info!(
                cluster = %target,
                moved,
                retired = ?retired,
                clusters = self.order.len(),
                "merged selection into cluster"
            );
        } else {
            tracing::debug!(cluster = %target, "selection already in target cluster");
        }
        Ok(EditOutcome {
            cluster: target,
            moved,
            retired,
        })
    }

    /// Check all structural invariants. O(N); meant for tests and debugging.
    pub fn is_consistent(&self) -> bool {
        if self.order.len() != self.clusters.len() {
            return false;
        }
        if !self.order.windows(2).all(|w| w[0] < w[1]) {
            return false;
        }
        let mut counted = 0;
        for id in &self.order {
            let Some(cluster) = self.clusters.get(id) else {
                return false;
            };
            if cluster.members.is_empty() || id.0 >= self.next_id {
                return false;
            }
            if cluster
                .members
                .iter()
                .any(|&i| self.assignment.get(i) != Some(id))
            {
                return false;
            }
            counted += cluster.members.len();
        }
        counted == self.assignment.len()
    }

    fn cluster(&self, id: ClusterId) -> Result<&Cluster> {
        self.clusters.get(&id).ok_or(Error::UnknownCluster(id))
    }

    fn cluster_mut(&mut self, id: ClusterId) -> Result<&mut Cluster> {
        self.clusters.get_mut(&id).ok_or(Error::UnknownCluster(id))
    }

    fn validate(&self, selection: &BTreeSet<usize>) -> Result<()> {
        let len = self.assignment.len();
        // BTreeSet iterates ascending, so the last element is the only candidate.
        match selection.last() {
            Some(&index) if index >= len => Err(Error::OutOfRange { index, len }),
            _ => Ok(()),
        }
    }

    /// Next `{prefix}{count}` not already worn by a live cluster.
    fn fresh_name(&mut self) -> String {
        loop {
            let name = format!("{}{}", self.new_label_prefix, self.new_label_count);
            self.new_label_count += 1;
            if !self.clusters.values().any(|c| c.name == name) {
                return name;
            }
        }
    }

    fn allocate(&mut self, name: String, color: Color) -> ClusterId {
        let id = ClusterId(self.next_id);
        self.next_id += 1;
        self.clusters.insert(
            id,
            Cluster {
                name,
                color,
                members: BTreeSet::new(),
            },
        );
        self.order.push(id);
        id
    }

    /// Reassign without checks, then retire emptied sources. Returns `(moved, retired)`.
    fn reassign(
        &mut self,
        selection: &BTreeSet<usize>,
        target: ClusterId,
    ) -> (usize, Vec<ClusterId>) {
        let mut sources: BTreeSet<ClusterId> = BTreeSet::new();
        let mut moved = 0;
        for &i in selection {
            let source = self.assignment[i];
            if source == target {
                continue;
            }
            if let Some(c) = self.clusters.get_mut(&source) {
                c.members.remove(&i);
            }
            if let Some(c) = self.clusters.get_mut(&target) {
                c.members.insert(i);
            }
            self.assignment[i] = target;
            sources.insert(source);
            moved += 1;
        }

        let retired: Vec<ClusterId> = self
            .order
            .iter()
            .copied()
            .filter(|id| {
                sources.contains(id)
                    && self.clusters.get(id).is_some_and(|c| c.members.is_empty())
            })
            .collect();
        for id in &retired {
            self.clusters.remove(id);
        }
        self.order.retain(|id| !retired.contains(id));
        (moved, retired)
    }
}
