//! Session construction and the read-only query surface.

use super::controller::EditController;
use super::legend::LegendModel;
use super::palette::{Color, Palette};
use super::params::EditorParams;
use super::partition::Partition;
use super::points::PointStore;
use super::selection::SelectionSet;
use crate::error::{Error, Result};

/// One label-editing session: fixed points, their editable partition, the current
/// selection and the legend.
///
/// Everything the renderer needs is readable through shared borrows; every change goes
/// through [`Session::controller`].
#[derive(Debug, Clone)]
pub struct Session {
    points: PointStore,
    partition: Partition,
    selection: SelectionSet,
    legend: LegendModel,
    params: EditorParams,
}

impl Session {
    /// Build a session with default parameters.
    ///
    /// `coords`, `labels` and (if given) `metadata` must all have the same length.
    pub fn create<S: AsRef<str>>(
        coords: Vec<(f32, f32)>,
        labels: &[S],
        metadata: Option<Vec<String>>,
    ) -> Result<Self> {
        let mut builder = SessionBuilder::new(coords, labels);
        if let Some(meta) = metadata {
            builder = builder.with_metadata(meta);
        }
        builder.build()
    }

    /// Start configuring a session.
    pub fn builder<S: AsRef<str>>(coords: Vec<(f32, f32)>, labels: &[S]) -> SessionBuilder {
        SessionBuilder::new(coords, labels)
    }

    /// The fixed point cloud.
    pub fn points(&self) -> &PointStore {
        &self.points
    }

    /// Current cluster assignment.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Currently selected points.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Legend rows derived from the partition.
    pub fn legend(&self) -> &LegendModel {
        &self.legend
    }

    /// Parameters the session was built with.
    pub fn params(&self) -> &EditorParams {
        &self.params
    }

    /// Changes whenever the partition or the selection changes.
    pub fn revision(&self) -> u64 {
        self.partition.revision() + self.selection.revision()
    }

    /// Current display name of every point's cluster, in point index order.
    pub fn labels_by_index(&self) -> Vec<String> {
        self.partition.labels_by_index()
    }

    /// Borrow the session for one user action.
    pub fn controller(&mut self) -> EditController<'_> {
        EditController {
            points: &self.points,
            partition: &mut self.partition,
            selection: &mut self.selection,
            legend: &mut self.legend,
            params: &self.params,
        }
    }
}

#[derive(Debug, Clone)]
enum PaletteSource {
    Default,
    Colors(Vec<Color>),
    Named(String),
}

/// Builder for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    coords: Vec<(f32, f32)>,
    labels: Vec<String>,
    metadata: Option<Vec<String>>,
    factors: Vec<String>,
    palette: PaletteSource,
    params: EditorParams,
}

impl SessionBuilder {
    /// Start from coordinates and one initial label per point.
    pub fn new<S: AsRef<str>>(coords: Vec<(f32, f32)>, labels: &[S]) -> Self {
        Self {
            coords,
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
            metadata: None,
            factors: Vec::new(),
            palette: PaletteSource::Default,
            params: EditorParams::default(),
        }
    }

    /// Per-point hover text.
    pub fn with_metadata(mut self, metadata: Vec<String>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Fix the legend order (and hence initial colors) of these labels.
    pub fn with_factors<S: AsRef<str>>(mut self, factors: &[S]) -> Self {
        self.factors = factors.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    /// Use these colors, extended or truncated to `palette_length`.
    pub fn with_palette(mut self, colors: Vec<Color>) -> Self {
        self.palette = PaletteSource::Colors(colors);
        self
    }

    /// Use a built-in palette by name (see [`PALETTE_NAMES`](super::PALETTE_NAMES)).
    /// Unknown names fail at [`SessionBuilder::build`].
    pub fn with_named_palette(mut self, name: impl Into<String>) -> Self {
        self.palette = PaletteSource::Named(name.into());
        self
    }

    /// Replace every parameter at once.
    pub fn with_params(mut self, params: EditorParams) -> Self {
        self.params = params;
        self
    }

    /// Number of palette colors to prepare.
    pub fn with_palette_length(mut self, palette_length: usize) -> Self {
        self.params.palette_length = palette_length;
        self
    }

    /// Shuffle the palette, reproducibly when `seed` is given.
    pub fn with_palette_shuffle(mut self, seed: Option<u64>) -> Self {
        self.params.palette_shuffle = true;
        self.params.seed = seed;
        self
    }

    /// Name prefix for split clusters.
    pub fn with_new_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.params.new_label_prefix = prefix.into();
        self
    }

    /// Hit radius of the pick tool, in data units.
    pub fn with_pick_radius(mut self, radius: f32) -> Self {
        self.params.pick_radius = radius;
        self
    }

    /// Enable or disable legend checkbox selection.
    pub fn with_selectable_legend(mut self, selectable: bool) -> Self {
        self.params.selectable_legend = selectable;
        self
    }

    /// Validate the inputs and create the session.
    pub fn build(self) -> Result<Session> {
        self.params.validate()?;
        let n = self.coords.len();
        if self.labels.len() != n {
            return Err(Error::LengthMismatch {
                what: "labels",
                expected: n,
                found: self.labels.len(),
            });
        }

        let points = PointStore::new(self.coords, self.metadata)?;

        let length = self.params.palette_length;
        let mut palette = match self.palette {
            PaletteSource::Default => Palette::generate(length),
            PaletteSource::Colors(colors) => Palette::from_colors(colors, length),
            PaletteSource::Named(name) => Palette::named(&name, length)?,
        };
        if self.params.palette_shuffle {
            palette.shuffle(self.params.seed);
        }

        let partition = Partition::with_options(
            n,
            &self.labels,
            &self.factors,
            palette,
            self.params.new_label_prefix.as_str(),
        )?;
        let selection = SelectionSet::new(n);
        let legend = LegendModel::new(&partition, self.params.selectable_legend);

        tracing::debug!(
            points = n,
            clusters = partition.cluster_count(),
            palette = partition.palette().len(),
            "label editing session created"
        );

        Ok(Session {
            points,
            partition,
            selection,
            legend,
            params: self.params,
        })
    }
}
