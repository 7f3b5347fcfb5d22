//! Mapping between raw images and the square network input.
//!
//! Images are resized by one factor so the longer side fits the network input
//! and then padded at the bottom/right. Detections are mapped back by the
//! inverse factor.

use crate::common::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageScale {
    /// Factor from raw image pixels to network input pixels.
    pub scale: f32,
    /// Raw image size after resizing, before padding.
    pub resized_size: HW<usize>,
}

impl ImageScale {
    pub fn compute(raw_size: HW<usize>, input_size: usize) -> Result<Self> {
        let [height, width] = raw_size.hw();
        ensure!(
            height > 0 && width > 0,
            AnchorError::EmptyImage { height, width }
        );
        ensure!(input_size > 0, "input size must be positive");

        let (height, width) = (height as f32, width as f32);
        let scale_y = input_size as f32 / height;
        let scale_x = input_size as f32 / width;
        let scale = scale_x.min(scale_y);

        let resized_size = HW::from_hw([(height * scale) as usize, (width * scale) as usize]);
        Ok(Self {
            scale,
            resized_size,
        })
    }

    /// Factor from network input pixels back to raw image pixels.
    pub fn inverse_scale(&self) -> f32 {
        1.0 / self.scale
    }
}

/// Rescales the leading `(x_min, y_min, x_max, y_max)` columns of `[N, 4 + K]`
/// predictions by `image_scale`, copying the remaining columns unchanged.
///
/// Rows are multiplied as they are; unordered corners are not rejected.
pub fn scale_boxes(predictions: ArrayView2<'_, f32>, image_scale: f32) -> Result<Array2<f32>> {
    ensure!(
        predictions.ncols() >= 4,
        "expect predictions of shape [N, 4 + K], but get {:?}",
        predictions.shape()
    );
    ensure!(
        image_scale.is_finite() && image_scale > 0.0,
        "image scale must be positive and finite, but get {}",
        image_scale
    );

    let transform = Transform::from_scale(image_scale);
    let mut output = predictions.to_owned();

    output.outer_iter_mut().for_each(|mut row| {
        let scaled = transform.map_ltrb([row[0], row[1], row[2], row[3]]);
        row.slice_mut(s![0..4])
            .iter_mut()
            .zip(scaled)
            .for_each(|(dst, src)| *dst = src);
    });

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn landscape_image_fits_width() -> Result<()> {
        let scale = ImageScale::compute(HW::from_hw([480, 640]), 512)?;
        assert_abs_diff_eq!(scale.scale, 0.8);
        assert_eq!(scale.resized_size.hw(), [384, 512]);
        assert_abs_diff_eq!(scale.inverse_scale(), 1.25, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn boxes_are_scaled_back() -> Result<()> {
        let predictions = array![[10.0f32, 20.0, 30.0, 40.0, 0.9, 3.0]];
        let scaled = scale_boxes(predictions.view(), 2.0)?;
        assert_eq!(scaled, array![[20.0f32, 40.0, 60.0, 80.0, 0.9, 3.0]]);

        // degenerate rows pass through
        let predictions = array![[30.0f32, 40.0, 10.0, 20.0, 0.5]];
        let scaled = scale_boxes(predictions.view(), 0.5)?;
        assert_eq!(scaled, array![[15.0f32, 20.0, 5.0, 10.0, 0.5]]);

        let scale = ImageScale::compute(HW::from_hw([256, 1024]), 512)?;
        let detections = array![[0.0f32, 0.0, 512.0, 128.0, 0.7]];
        let raw = scale_boxes(detections.view(), scale.inverse_scale())?;
        assert_eq!(raw, array![[0.0f32, 0.0, 1024.0, 256.0, 0.7]]);
        Ok(())
    }

    #[test]
    fn reject_narrow_predictions() {
        let predictions = Array2::<f32>::zeros((2, 3));
        assert!(scale_boxes(predictions.view(), 1.0).is_err());
        assert!(ImageScale::compute(HW::from_hw([0, 10]), 512).is_err());
    }
}
