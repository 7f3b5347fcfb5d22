//! Expansion of pyramid parameters into per-anchor parameter rows.

use crate::{common::*, feature_size::MAX_LEVEL_LIMIT};

/// Anchor parameters of one (scale, aspect ratio) combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorParams {
    pub stride_y: f64,
    pub stride_x: f64,
    pub octave_scale: f64,
    pub aspect_ratio: f64,
    pub anchor_scale: f64,
}

/// Parallel parameter arrays of one pyramid level.
///
/// All arrays have one entry per (scale, aspect ratio) combination, ordered
/// scale-major: the octave scales read `[s0, s0, .., s1, s1, ..]` and the
/// aspect ratios read `[a0, a1, .., a0, a1, ..]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub level: usize,
    pub feature_size: HW<usize>,
    pub strides_y: Vec<f64>,
    pub strides_x: Vec<f64>,
    pub octave_scales: Vec<f64>,
    pub aspect_ratios: Vec<f64>,
    pub anchor_scales: Vec<f64>,
}

impl LevelConfig {
    pub fn num_combinations(&self) -> usize {
        self.octave_scales.len()
    }

    pub fn params(&self, combination: usize) -> AnchorParams {
        AnchorParams {
            stride_y: self.strides_y[combination],
            stride_x: self.strides_x[combination],
            octave_scale: self.octave_scales[combination],
            aspect_ratio: self.aspect_ratios[combination],
            anchor_scale: self.anchor_scales[combination],
        }
    }

    pub fn iter_params(&self) -> impl Iterator<Item = AnchorParams> + '_ {
        (0..self.num_combinations()).map(move |combination| self.params(combination))
    }
}

/// Per-level configurations of a whole pyramid.
#[derive(Debug, Clone, PartialEq)]
pub struct Configurations {
    pub levels: Vec<LevelConfig>,
    pub num_levels: usize,
    pub combinations: usize,
}

/// Counts levels in `min_level..=max_level`, rejecting inverted or
/// unboundedly deep ranges.
pub fn num_levels(min_level: usize, max_level: usize) -> Result<usize> {
    ensure!(
        max_level >= min_level,
        AnchorError::InvalidLevelRange {
            min_level,
            max_level
        }
    );
    ensure!(
        max_level <= MAX_LEVEL_LIMIT,
        AnchorError::LevelTooDeep {
            max_level,
            limit: MAX_LEVEL_LIMIT
        }
    );
    Ok(max_level - min_level + 1)
}

pub(crate) fn check_aspect_ratios(aspect_ratios: &[f64]) -> Result<()> {
    ensure!(!aspect_ratios.is_empty(), AnchorError::EmptyAspectRatios);
    aspect_ratios.iter().try_for_each(|&ratio| -> Result<_> {
        ensure!(
            ratio.is_finite() && ratio > 0.0,
            AnchorError::NonPositiveAspectRatio(ratio)
        );
        Ok(())
    })
}

pub(crate) fn check_strides(stride_y: f64, stride_x: f64) -> Result<()> {
    ensure!(
        stride_y.is_finite() && stride_y > 0.0 && stride_x.is_finite() && stride_x > 0.0,
        AnchorError::ZeroStride { stride_y, stride_x }
    );
    Ok(())
}

pub(crate) fn check_anchor_scales(anchor_scales: &[f64]) -> Result<()> {
    anchor_scales.iter().try_for_each(|&scale| -> Result<_> {
        ensure!(
            scale.is_finite() && scale > 0.0,
            AnchorError::NonPositiveAnchorScale(scale)
        );
        Ok(())
    })
}

/// Builds the parameter rows for levels `min_level..=max_level`.
///
/// `feature_sizes` must start at level 0 (the input image), as produced by
/// [compute_feature_sizes](crate::compute_feature_sizes). Strides are the
/// ratio between the level-0 extent and the level extent, so they grow as
/// the feature map shrinks.
pub fn generate_configurations(
    feature_sizes: &[HW<usize>],
    min_level: usize,
    max_level: usize,
    num_scales: usize,
    aspect_ratios: &[f64],
    anchor_scales: &[f64],
) -> Result<Configurations> {
    let num_levels = num_levels(min_level, max_level)?;
    ensure!(
        feature_sizes.len() > max_level,
        AnchorError::MissingFeatureSizes {
            expect: max_level + 1,
            actual: feature_sizes.len(),
            max_level,
        }
    );
    ensure!(num_scales > 0, AnchorError::ZeroScales);
    check_aspect_ratios(aspect_ratios)?;
    ensure!(
        anchor_scales.len() == num_levels,
        AnchorError::LevelCountMismatch {
            expect: num_levels,
            actual: anchor_scales.len()
        }
    );
    check_anchor_scales(anchor_scales)?;

    let combinations = num_scales * aspect_ratios.len();
    let base_size = feature_sizes[0];

    let octave_scales: Vec<f64> = (0..num_scales)
        .flat_map(|scale| {
            let octave = scale as f64 / num_scales as f64;
            std::iter::repeat(octave).take(aspect_ratios.len())
        })
        .collect();
    let aspects: Vec<f64> = aspect_ratios
        .iter()
        .cycle()
        .take(combinations)
        .cloned()
        .collect();

    let levels = (min_level..=max_level)
        .zip(anchor_scales)
        .map(|(level, &anchor_scale)| -> Result<_> {
            let feature_size = feature_sizes[level];
            let stride_y = base_size.h() as f64 * (feature_size.h() as f64).recip();
            let stride_x = base_size.w() as f64 * (feature_size.w() as f64).recip();
            check_strides(stride_y, stride_x)
                .with_context(|| format!("invalid feature size at level {}", level))?;

            Ok(LevelConfig {
                level,
                feature_size,
                strides_y: vec![stride_y; combinations],
                strides_x: vec![stride_x; combinations],
                octave_scales: octave_scales.clone(),
                aspect_ratios: aspects.clone(),
                anchor_scales: vec![anchor_scale; combinations],
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Configurations {
        levels,
        num_levels,
        combinations,
    })
}
