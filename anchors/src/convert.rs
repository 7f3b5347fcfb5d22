//! Batch conversion between corner form and center form.

use crate::common::*;
use num_traits::Num;

fn check_box_array<T>(boxes: &ArrayView2<'_, T>) -> Result<()> {
    ensure!(
        boxes.ncols() == 4,
        "expect a box array of shape [N, 4], but get {:?}",
        boxes.shape()
    );
    Ok(())
}

/// Converts `[N, 4]` corner boxes `(x_min, y_min, x_max, y_max)` into
/// center boxes `(center_x, center_y, width, height)`.
pub fn to_center_form<T>(boxes: ArrayView2<'_, T>) -> Result<Array2<T>>
where
    T: Copy + Num + PartialOrd,
{
    check_box_array(&boxes)?;

    let mut values = Vec::with_capacity(boxes.len());
    for row in boxes.outer_iter() {
        let rect = LTRB::try_from_ltrb([row[0], row[1], row[2], row[3]])?;
        values.extend(CxCyWH::from(&rect).cxcywh());
    }

    Ok(Array2::from_shape_vec((boxes.nrows(), 4), values)?)
}

/// Converts `[N, 4]` center boxes `(center_x, center_y, width, height)` into
/// corner boxes `(x_min, y_min, x_max, y_max)`.
pub fn to_corner_form<T>(boxes: ArrayView2<'_, T>) -> Result<Array2<T>>
where
    T: Copy + Num + PartialOrd,
{
    check_box_array(&boxes)?;

    let mut values = Vec::with_capacity(boxes.len());
    for row in boxes.outer_iter() {
        let rect = CxCyWH::try_from_cxcywh([row[0], row[1], row[2], row[3]])?;
        values.extend(LTRB::from(&rect).ltrb());
    }

    Ok(Array2::from_shape_vec((boxes.nrows(), 4), values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn corner_to_center() -> Result<()> {
        let corners = array![[0.0f32, 0.0, 1.0, 0.5], [0.25, 0.5, 0.75, 1.0]];
        let centers = to_center_form(corners.view())?;
        assert_eq!(centers, array![[0.5, 0.25, 1.0, 0.5], [0.5, 0.75, 0.5, 0.5]]);
        Ok(())
    }

    #[test]
    fn center_round_trip() -> Result<()> {
        let corners = array![[-0.1f32, 0.2, 0.3, 0.9], [0.01, 0.02, 0.03, 0.04]];
        let back = to_corner_form(to_center_form(corners.view())?.view())?;
        back.iter()
            .zip(corners.iter())
            .for_each(|(&lhs, &rhs)| assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-6));
        Ok(())
    }

    #[test]
    fn reject_wrong_shape() {
        let boxes = Array2::<f32>::zeros((3, 5));
        assert!(to_center_form(boxes.view()).is_err());
        assert!(to_corner_form(boxes.view()).is_err());
    }

    #[test]
    fn reject_inverted_boxes() {
        let corners = array![[1.0f32, 0.0, 0.0, 1.0]];
        assert!(to_center_form(corners.view()).is_err());
    }
}
