use thiserror::Error;

/// Failures raised while validating anchor parameters.
///
/// Functions in this crate return [anyhow::Result]; these values travel
/// inside the [anyhow::Error] and can be recovered with `downcast_ref`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnchorError {
    #[error("max_level ({max_level}) must not be less than min_level ({min_level})")]
    InvalidLevelRange { min_level: usize, max_level: usize },
    #[error("max_level ({max_level}) exceeds the deepest supported level ({limit})")]
    LevelTooDeep { max_level: usize, limit: usize },
    #[error("expect {expect} per-level anchor scales, but get {actual}")]
    LevelCountMismatch { expect: usize, actual: usize },
    #[error("expect at least {expect} feature sizes to reach level {max_level}, but get {actual}")]
    MissingFeatureSizes {
        expect: usize,
        actual: usize,
        max_level: usize,
    },
    #[error("num_scales must be positive")]
    ZeroScales,
    #[error("at least one aspect ratio is required")]
    EmptyAspectRatios,
    #[error("image size must be non-empty, but get {height}x{width}")]
    EmptyImage { height: usize, width: usize },
    #[error("aspect ratio must be positive and finite, but get {0}")]
    NonPositiveAspectRatio(f64),
    #[error("anchor scale must be positive and finite, but get {0}")]
    NonPositiveAnchorScale(f64),
    #[error("strides must be positive and finite, but get ({stride_y}, {stride_x})")]
    ZeroStride { stride_y: f64, stride_x: f64 },
}

impl AnchorError {
    /// Returns true for malformed setups, false for numeric-domain errors.
    pub fn is_config_error(&self) -> bool {
        use AnchorError as E;

        match self {
            E::InvalidLevelRange { .. }
            | E::LevelTooDeep { .. }
            | E::LevelCountMismatch { .. }
            | E::MissingFeatureSizes { .. }
            | E::ZeroScales
            | E::EmptyAspectRatios
            | E::EmptyImage { .. } => true,
            E::NonPositiveAspectRatio(_) | E::NonPositiveAnchorScale(_) | E::ZeroStride { .. } => {
                false
            }
        }
    }
}
