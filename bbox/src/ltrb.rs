use super::{CxCyWH, Rect};
use crate::common::*;

/// Bounding box in corner form `(x_min, y_min, x_max, y_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LTRB<T> {
    pub(crate) l: T,
    pub(crate) t: T,
    pub(crate) r: T,
    pub(crate) b: T,
}

impl<T> Rect for LTRB<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn l(&self) -> Self::Type {
        self.l
    }

    fn t(&self) -> Self::Type {
        self.t
    }

    fn r(&self) -> Self::Type {
        self.r
    }

    fn b(&self) -> Self::Type {
        self.b
    }

    fn cx(&self) -> Self::Type {
        let two = T::one() + T::one();
        (self.r + self.l) / two
    }

    fn cy(&self) -> Self::Type {
        let two = T::one() + T::one();
        (self.b + self.t) / two
    }

    fn w(&self) -> Self::Type {
        self.r - self.l
    }

    fn h(&self) -> Self::Type {
        self.b - self.t
    }

    fn try_from_ltrb(ltrb: [Self::Type; 4]) -> Result<Self> {
        let [l, t, r, b] = ltrb;
        ensure!(r >= l && b >= t, "r >= l and b >= t must hold");

        Ok(Self { l, t, r, b })
    }

    fn try_from_cxcywh(cxcywh: [Self::Type; 4]) -> Result<Self> {
        let [cx, cy, w, h] = cxcywh;
        let zero = T::zero();
        ensure!(w >= zero && h >= zero, "w and h must be non-negative");

        let two = T::one() + T::one();
        let l = cx - w / two;
        let t = cy - h / two;
        let r = cx + w / two;
        let b = cy + h / two;

        Ok(Self { l, t, r, b })
    }
}

impl<T> From<CxCyWH<T>> for LTRB<T>
where
    T: Copy + Num,
{
    fn from(from: CxCyWH<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&CxCyWH<T>> for LTRB<T>
where
    T: Copy + Num,
{
    fn from(from: &CxCyWH<T>) -> Self {
        let two = T::one() + T::one();
        let CxCyWH { cx, cy, w, h } = *from;
        let l = cx - w / two;
        let t = cy - h / two;
        let r = cx + w / two;
        let b = cy + h / two;
        Self { l, t, r, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RectNum;

    #[test]
    fn reject_inverted_corners() {
        assert!(LTRB::try_from_ltrb([1.0, 0.0, 0.0, 1.0]).is_err());
        assert!(LTRB::try_from_ltrb([0.0, 1.0, 1.0, 0.0]).is_err());
    }

    #[test]
    fn center_of_corner_box() {
        let rect = LTRB::from_ltrb([0.25, 0.5, 0.75, 1.0]);
        assert_eq!(rect.cxcywh(), [0.5, 0.75, 0.5, 0.5]);
    }
}
