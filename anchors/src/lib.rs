//! Prior box generation for EfficientDet-style feature pyramids.
//!
//! Anchors are laid out level-major, then grid point (row-major), then
//! octave scale and aspect ratio. The boxes are normalized by the input image
//! size and reported in center form `(center_x, center_y, width, height)`.

mod common;
pub mod config;
pub mod convert;
pub mod error;
pub mod feature_size;
pub mod geometry;
pub mod image_scale;
pub mod level;
pub mod level_config;
pub mod preset;
pub mod prior_box;

pub use config::*;
pub use convert::*;
pub use error::*;
pub use feature_size::*;
pub use geometry::*;
pub use image_scale::*;
pub use level::*;
pub use level_config::*;
pub use preset::EfficientDet;
pub use prior_box::*;

pub use bbox::{CxCyWH, HW, LTRB};
