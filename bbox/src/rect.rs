use crate::common::*;

/// The generic rectangle.
///
/// Accessors follow image coordinates: `l`/`r` are x extents and `t`/`b` are
/// y extents, with `t <= b`.
pub trait Rect {
    type Type;

    fn l(&self) -> Self::Type;
    fn t(&self) -> Self::Type;
    fn r(&self) -> Self::Type;
    fn b(&self) -> Self::Type;
    fn cx(&self) -> Self::Type;
    fn cy(&self) -> Self::Type;
    fn w(&self) -> Self::Type;
    fn h(&self) -> Self::Type;

    fn try_from_ltrb(ltrb: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;

    fn try_from_cxcywh(cxcywh: [Self::Type; 4]) -> Result<Self>
    where
        Self: Sized;
}

pub trait RectNum: Rect
where
    Self::Type: Num + PartialOrd,
{
    fn from_ltrb(ltrb: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_ltrb(ltrb).unwrap()
    }

    fn from_cxcywh(cxcywh: [Self::Type; 4]) -> Self
    where
        Self: Sized,
    {
        Self::try_from_cxcywh(cxcywh).unwrap()
    }

    fn ltrb(&self) -> [Self::Type; 4] {
        [self.l(), self.t(), self.r(), self.b()]
    }

    fn cxcywh(&self) -> [Self::Type; 4] {
        [self.cx(), self.cy(), self.w(), self.h()]
    }
}

impl<T> RectNum for T
where
    T: Rect,
    T::Type: Num + PartialOrd,
{
}
