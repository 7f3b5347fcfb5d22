//! Safe bounding box types and functions.
//!
//! Boxes are stored x-first: [LTRB] holds `(x_min, y_min, x_max, y_max)` and
//! [CxCyWH] holds `(center_x, center_y, width, height)`.

mod common;

pub use transform::*;
mod transform;

pub use rect::*;
pub mod rect;

pub use ltrb::*;
pub mod ltrb;

pub use cxcywh::*;
pub mod cxcywh;

pub use hw::*;
pub mod hw;

pub mod prelude {
    pub use crate::rect::{Rect, RectNum};
}
