//! Anchor settings of the EfficientDet model family.

use crate::{
    common::*,
    config::{AnchorConfig, AnchorScale},
};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const MIN_LEVEL: usize = 3;
pub const MAX_LEVEL: usize = 7;
pub const NUM_SCALES: usize = 3;
pub const ASPECT_RATIOS: [f64; 3] = [1.0, 2.0, 0.5];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
pub enum EfficientDet {
    #[serde(rename = "efficientdet-d0")]
    #[strum(to_string = "efficientdet-d0", serialize = "d0")]
    D0,
    #[serde(rename = "efficientdet-d1")]
    #[strum(to_string = "efficientdet-d1", serialize = "d1")]
    D1,
    #[serde(rename = "efficientdet-d2")]
    #[strum(to_string = "efficientdet-d2", serialize = "d2")]
    D2,
    #[serde(rename = "efficientdet-d3")]
    #[strum(to_string = "efficientdet-d3", serialize = "d3")]
    D3,
    #[serde(rename = "efficientdet-d4")]
    #[strum(to_string = "efficientdet-d4", serialize = "d4")]
    D4,
    #[serde(rename = "efficientdet-d5")]
    #[strum(to_string = "efficientdet-d5", serialize = "d5")]
    D5,
    #[serde(rename = "efficientdet-d6")]
    #[strum(to_string = "efficientdet-d6", serialize = "d6")]
    D6,
    #[serde(rename = "efficientdet-d7")]
    #[strum(to_string = "efficientdet-d7", serialize = "d7")]
    D7,
}

impl EfficientDet {
    /// Square input resolution in pixels.
    pub fn input_size(&self) -> usize {
        match self {
            Self::D0 => 512,
            Self::D1 => 640,
            Self::D2 => 768,
            Self::D3 => 896,
            Self::D4 => 1024,
            Self::D5 | Self::D6 => 1280,
            Self::D7 => 1536,
        }
    }

    pub fn anchor_scale(&self) -> f64 {
        match self {
            Self::D7 => 5.0,
            _ => 4.0,
        }
    }

    pub fn anchor_config(&self) -> AnchorConfig {
        let size = self.input_size();
        AnchorConfig {
            image_size: [size, size],
            min_level: MIN_LEVEL,
            max_level: MAX_LEVEL,
            num_scales: NUM_SCALES,
            aspect_ratios: ASPECT_RATIOS.iter().map(|&ratio| r64(ratio)).collect(),
            anchor_scale: AnchorScale::from(self.anchor_scale()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parse_preset_names() -> Result<()> {
        assert_eq!(EfficientDet::from_str("efficientdet-d3")?, EfficientDet::D3);
        assert_eq!(EfficientDet::from_str("d7")?, EfficientDet::D7);
        assert!(EfficientDet::from_str("d9").is_err());
        assert_eq!(EfficientDet::D0.to_string(), "efficientdet-d0");
        Ok(())
    }

    #[test]
    fn presets_share_pyramid_layout() {
        EfficientDet::iter().for_each(|preset| {
            let config = preset.anchor_config();
            assert_eq!(config.num_levels().unwrap(), 5);
            assert_eq!(config.num_combinations(), 9);
            assert_eq!(config.image_size[0] % 128, 0);
        });
    }
}
