//! Box extents and grid centers of one anchor combination.

use crate::{
    common::*,
    level_config::{check_strides, AnchorParams},
};

/// Normalized geometry shared by all anchors of one combination on one level.
///
/// Every grid point carries a box of the same half extents; only the center
/// moves. `centers_x[i]` and `centers_y[i]` describe grid point `i` in
/// row-major order (y outer, x inner).
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorGeometry {
    pub centers_x: Vec<f64>,
    pub centers_y: Vec<f64>,
    pub half_width: f64,
    pub half_height: f64,
}

impl AnchorGeometry {
    pub fn num_grid_points(&self) -> usize {
        self.centers_x.len()
    }

    /// Returns `(x_min, y_min, x_max, y_max)` of the box at grid point `point`.
    pub fn corner(&self, point: usize) -> [f64; 4] {
        let cx = self.centers_x[point];
        let cy = self.centers_y[point];
        [
            cx - self.half_width,
            cy - self.half_height,
            cx + self.half_width,
            cy + self.half_height,
        ]
    }
}

/// Splits an aspect ratio into x and y multipliers whose product is one.
pub fn compute_aspect_ratio(aspect_ratio: f64) -> (f64, f64) {
    let aspect_x = aspect_ratio.sqrt();
    let aspect_y = 1.0 / aspect_x;
    (aspect_x, aspect_y)
}

/// Values `start, start + step, ..` strictly below `stop`, counted the way
/// a half-open numeric range is: `ceil((stop - start) / step)` entries.
pub(crate) fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let len = ((stop - start) / step).ceil();
    let len = if len > 0.0 { len as usize } else { 0 };
    (0..len).map(|index| start + index as f64 * step).collect()
}

/// Computes the normalized box extents and grid centers of one combination.
///
/// x quantities are normalized by the image width (second component of
/// `image_size`) and y quantities by the image height.
pub fn compute_box_coordinates(params: &AnchorParams, image_size: HW<usize>) -> Result<AnchorGeometry> {
    let AnchorParams {
        stride_y,
        stride_x,
        octave_scale,
        aspect_ratio,
        anchor_scale,
    } = *params;
    let [height, width] = image_size.hw();
    ensure!(
        height > 0 && width > 0,
        AnchorError::EmptyImage { height, width }
    );
    ensure!(
        aspect_ratio.is_finite() && aspect_ratio > 0.0,
        AnchorError::NonPositiveAspectRatio(aspect_ratio)
    );
    check_strides(stride_y, stride_x)?;
    let (image_h, image_w) = (height as f64, width as f64);

    let octave = 2f64.powf(octave_scale);
    let base_anchor_x = anchor_scale * stride_x * octave;
    let base_anchor_y = anchor_scale * stride_y * octave;
    let (aspect_x, aspect_y) = compute_aspect_ratio(aspect_ratio);
    let half_width = (base_anchor_x * aspect_x / 2.0) / image_w;
    let half_height = (base_anchor_y * aspect_y / 2.0) / image_h;

    let xs = arange(stride_x / 2.0, image_w, stride_x);
    let ys = arange(stride_y / 2.0, image_h, stride_y);
    let (centers_x, centers_y): (Vec<_>, Vec<_>) = ys
        .iter()
        .cartesian_product(&xs)
        .map(|(&y, &x)| (x / image_w, y / image_h))
        .unzip();

    Ok(AnchorGeometry {
        centers_x,
        centers_y,
        half_width,
        half_height,
    })
}
