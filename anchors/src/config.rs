use crate::{
    common::*,
    level_config::num_levels,
    preset::EfficientDet,
    prior_box::{build_prior_boxes_with_scales, PriorBoxes},
};

pub static CONFIG_VERSION: Lazy<VersionReq> = Lazy::new(|| VersionReq::parse("0.1.0").unwrap());

/// The anchor configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: Version,
    pub anchors: AnchorSource,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        Self::from_json5(&text)
    }

    pub fn from_json5(text: &str) -> Result<Self> {
        let config = json5::from_str(text)?;
        Ok(config)
    }

    pub fn anchor_config(&self) -> AnchorConfig {
        self.anchors.to_config()
    }
}

/// Anchor parameters given either by preset name or spelled out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnchorSource {
    Preset { preset: EfficientDet },
    Custom(AnchorConfig),
}

impl AnchorSource {
    pub fn to_config(&self) -> AnchorConfig {
        match self {
            Self::Preset { preset } => preset.anchor_config(),
            Self::Custom(config) => config.clone(),
        }
    }
}

/// Anchor generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Input image size as `[height, width]` in pixels.
    pub image_size: [usize; 2],
    pub min_level: usize,
    pub max_level: usize,
    /// Number of octave scales per level.
    pub num_scales: usize,
    pub aspect_ratios: Vec<R64>,
    pub anchor_scale: AnchorScale,
}

impl AnchorConfig {
    pub fn image_size(&self) -> HW<usize> {
        HW::from_hw(self.image_size)
    }

    pub fn num_levels(&self) -> Result<usize> {
        num_levels(self.min_level, self.max_level)
    }

    pub fn num_combinations(&self) -> usize {
        self.num_scales * self.aspect_ratios.len()
    }

    pub fn aspect_ratios(&self) -> Vec<f64> {
        self.aspect_ratios.iter().map(|ratio| ratio.raw()).collect()
    }

    pub fn anchor_scales(&self) -> Result<Vec<f64>> {
        let num_levels = self.num_levels()?;
        self.anchor_scale.per_level(num_levels)
    }

    /// Generates the center-form prior boxes described by this configuration.
    pub fn build(&self) -> Result<PriorBoxes> {
        build_prior_boxes_with_scales(
            self.min_level,
            self.max_level,
            self.num_scales,
            &self.aspect_ratios(),
            &self.anchor_scales()?,
            self.image_size(),
        )
    }
}

/// Base anchor scale, shared by all levels or given per level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnchorScale {
    Uniform(R64),
    PerLevel(Vec<R64>),
}

impl AnchorScale {
    pub fn per_level(&self, num_levels: usize) -> Result<Vec<f64>> {
        let scales = match self {
            Self::Uniform(scale) => vec![scale.raw(); num_levels],
            Self::PerLevel(scales) => {
                ensure!(
                    scales.len() == num_levels,
                    AnchorError::LevelCountMismatch {
                        expect: num_levels,
                        actual: scales.len()
                    }
                );
                scales.iter().map(|scale| scale.raw()).collect()
            }
        };
        Ok(scales)
    }
}

impl From<f64> for AnchorScale {
    fn from(scale: f64) -> Self {
        Self::Uniform(r64(scale))
    }
}

pub fn deserialize_version<'de, D>(deserializer: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let version = Version::parse(&text).map_err(|err| {
        D::Error::custom(format!(
            "failed to parse version number '{}': {:?}",
            text, err
        ))
    })?;

    if !CONFIG_VERSION.matches(&version) {
        return Err(D::Error::custom(format!(
            "incompatible version: get '{}', but it is incompatible with requirement '{}'",
            version, &*CONFIG_VERSION,
        )));
    }

    Ok(version)
}
