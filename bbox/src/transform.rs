use crate::common::*;

/// Per-axis affine map `x' = x * sx + tx`, `y' = y * sy + ty`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sx: T,
    pub sy: T,
    pub tx: T,
    pub ty: T,
}

impl<T> Transform<T>
where
    T: Copy + Num,
{
    /// Uniform scaling without translation.
    pub fn from_scale(scale: T) -> Self {
        Self {
            sx: scale,
            sy: scale,
            tx: T::zero(),
            ty: T::zero(),
        }
    }

    pub fn map_x(&self, x: T) -> T {
        x * self.sx + self.tx
    }

    pub fn map_y(&self, y: T) -> T {
        y * self.sy + self.ty
    }

    /// Maps a `(x0, y0, x1, y1)` tuple without requiring it to be ordered.
    pub fn map_ltrb(&self, ltrb: [T; 4]) -> [T; 4] {
        let [l, t, r, b] = ltrb;
        [self.map_x(l), self.map_y(t), self.map_x(r), self.map_y(b)]
    }
}
