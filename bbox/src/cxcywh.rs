use super::{Rect, LTRB};
use crate::common::*;

/// Bounding box in center form `(center_x, center_y, width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CxCyWH<T> {
    pub(crate) cx: T,
    pub(crate) cy: T,
    pub(crate) w: T,
    pub(crate) h: T,
}

impl<T> Rect for CxCyWH<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn l(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cx - self.w / two
    }

    fn t(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cy - self.h / two
    }

    fn r(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cx + self.w / two
    }

    fn b(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.cy + self.h / two
    }

    fn cx(&self) -> Self::Type {
        self.cx
    }

    fn cy(&self) -> Self::Type {
        self.cy
    }

    fn w(&self) -> Self::Type {
        self.w
    }

    fn h(&self) -> Self::Type {
        self.h
    }

    fn try_from_ltrb(ltrb: [T; 4]) -> Result<Self> {
        let [l, t, r, b] = ltrb;
        ensure!(
            r >= l && b >= t,
            "box width and height must be non-negative"
        );
        Ok(LTRB { l, t, r, b }.into())
    }

    fn try_from_cxcywh(cxcywh: [T; 4]) -> Result<Self> {
        let [cx, cy, w, h] = cxcywh;
        let zero = T::zero();
        ensure!(
            w >= zero && h >= zero,
            "box width and height must be non-negative"
        );

        Ok(Self { cx, cy, w, h })
    }
}

impl<T> From<LTRB<T>> for CxCyWH<T>
where
    T: Copy + Num,
{
    fn from(from: LTRB<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&LTRB<T>> for CxCyWH<T>
where
    T: Copy + Num,
{
    /// Centers are taken as the midpoint `(max + min) / 2`, sizes as `max - min`.
    fn from(from: &LTRB<T>) -> Self {
        let two = T::one() + T::one();
        let LTRB { l, t, r, b } = *from;
        let cx = (r + l) / two;
        let cy = (b + t) / two;
        let w = r - l;
        let h = b - t;
        Self { cx, cy, w, h }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RectNum;
    use approx::assert_abs_diff_eq;

    #[test]
    fn corner_center_round_trip() {
        let orig = LTRB::from_ltrb([0.1f32, 0.2, 0.7, 0.4]);
        let back: LTRB<f32> = CxCyWH::from(&orig).into();
        orig.ltrb()
            .iter()
            .zip(back.ltrb().iter())
            .for_each(|(lhs, rhs)| assert_abs_diff_eq!(*lhs, *rhs, epsilon = 1e-6));
    }

    #[test]
    fn reject_negative_size() {
        assert!(CxCyWH::try_from_cxcywh([0.5, 0.5, -0.1, 0.2]).is_err());
        assert!(CxCyWH::try_from_ltrb([0.5, 0.0, 0.4, 1.0]).is_err());
    }
}
