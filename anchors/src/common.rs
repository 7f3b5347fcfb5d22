pub use crate::error::AnchorError;
pub use anyhow::{bail, ensure, Context, Result};
pub use bbox::{prelude::*, CxCyWH, Transform, HW, LTRB};
pub use itertools::Itertools;
pub use log::{debug, info};
pub use ndarray::{s, Array2, ArrayView2, Axis};
pub use noisy_float::prelude::*;
pub use once_cell::sync::Lazy;
pub use semver::{Version, VersionReq};
pub use serde::{de::Error as DeserializeError, Deserialize, Deserializer, Serialize};
pub use std::{
    fs,
    ops::Range,
    path::Path,
    sync::Arc,
};
