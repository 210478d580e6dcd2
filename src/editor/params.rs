use super::palette::MAX_PALETTE_LENGTH;
use crate::error::{Error, Result};

pub(crate) const DEFAULT_PALETTE_LENGTH: usize = 256;
pub(crate) const DEFAULT_NEW_LABEL_PREFIX: &str = "new_label_";

/// Label editor configuration.
#[derive(Clone, Debug)]
pub struct EditorParams {
    /// Number of colors in the palette clusters draw from.
    ///
    /// Having more colors than initial clusters leaves fresh colors for split clusters.
    pub palette_length: usize,

    /// Shuffle the palette before assigning colors.
    pub palette_shuffle: bool,

    /// Optional RNG seed for the shuffle.
    pub seed: Option<u64>,

    /// Name prefix for clusters created by a split; a per-session counter starting at 1
    /// is appended.
    pub new_label_prefix: String,

    /// Hit radius of the pick tool, in data units.
    pub pick_radius: f32,

    /// Whether legend checkboxes may select whole clusters. On by default.
    pub selectable_legend: bool,
}

impl Default for EditorParams {
    fn default() -> Self {
        Self {
            palette_length: DEFAULT_PALETTE_LENGTH,
            palette_shuffle: false,
            seed: None,
            new_label_prefix: DEFAULT_NEW_LABEL_PREFIX.to_string(),
            pick_radius: 0.05,
            selectable_legend: true,
        }
    }
}

impl EditorParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.palette_length == 0 {
            return Err(Error::InvalidParameter {
                name: "palette_length",
                message: "must be at least 1",
            });
        }
        if self.palette_length > MAX_PALETTE_LENGTH {
            return Err(Error::InvalidParameter {
                name: "palette_length",
                message: "must not exceed the number of 24-bit colors",
            });
        }
        if !(self.pick_radius.is_finite() && self.pick_radius >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "pick_radius",
                message: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EditorParams::default().validate().is_ok());
    }

    #[test]
    fn default_values() {
        let params = EditorParams::default();
        assert_eq!(params.palette_length, 256);
        assert!(!params.palette_shuffle);
        assert_eq!(params.new_label_prefix, "new_label_");
        assert!(params.selectable_legend);
    }

    #[test]
    fn palette_length_is_bounded() {
        let params = EditorParams {
            palette_length: MAX_PALETTE_LENGTH + 1,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidParameter {
                name: "palette_length",
                ..
            })
        ));
    }

    #[test]
    fn invalid_params() {
        let params = EditorParams {
            palette_length: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        for radius in [-1.0, f32::NAN, f32::INFINITY] {
            let params = EditorParams {
                pick_radius: radius,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(Error::InvalidParameter {
                    name: "pick_radius",
                    ..
                })
            ));
        }
    }
}
