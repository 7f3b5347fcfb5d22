//! Prior box generation across the whole feature pyramid.

use crate::{
    common::*,
    convert::{to_center_form, to_corner_form},
    feature_size::compute_feature_sizes,
    level::generate_level_boxes,
    level_config::{generate_configurations, num_levels},
};

/// The anchors contributed by one pyramid level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelSpan {
    pub level: usize,
    pub feature_size: HW<usize>,
    /// Row range of this level within the anchor array.
    pub range: Range<usize>,
}

impl LevelSpan {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Corner-form anchors and the level layout they were generated with.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerAnchors {
    pub boxes: Array2<f32>,
    pub spans: Vec<LevelSpan>,
}

/// Generates corner-form anchors `(x_min, y_min, x_max, y_max)` of levels
/// `min_level..=max_level`.
///
/// `anchor_scales` holds one base scale per level. The result has shape
/// `[N, 4]`, ordered level-major, then grid point, then combination.
pub fn generate_anchors(
    feature_sizes: &[HW<usize>],
    min_level: usize,
    max_level: usize,
    num_scales: usize,
    aspect_ratios: &[f64],
    image_size: HW<usize>,
    anchor_scales: &[f64],
) -> Result<Array2<f32>> {
    let CornerAnchors { boxes, .. } = generate_corner_anchors(
        feature_sizes,
        min_level,
        max_level,
        num_scales,
        aspect_ratios,
        image_size,
        anchor_scales,
    )?;
    Ok(boxes)
}

/// Same as [generate_anchors], but also reports the rows each level occupies.
pub fn generate_corner_anchors(
    feature_sizes: &[HW<usize>],
    min_level: usize,
    max_level: usize,
    num_scales: usize,
    aspect_ratios: &[f64],
    image_size: HW<usize>,
    anchor_scales: &[f64],
) -> Result<CornerAnchors> {
    let configs = generate_configurations(
        feature_sizes,
        min_level,
        max_level,
        num_scales,
        aspect_ratios,
        anchor_scales,
    )?;

    let level_boxes = configs
        .levels
        .iter()
        .map(|config| generate_level_boxes(config, image_size))
        .collect::<Result<Vec<_>>>()?;

    let spans: Vec<_> = configs
        .levels
        .iter()
        .zip(&level_boxes)
        .scan(0, |start, (config, boxes)| {
            let end = *start + boxes.nrows();
            let span = LevelSpan {
                level: config.level,
                feature_size: config.feature_size,
                range: *start..end,
            };
            *start = end;
            Some(span)
        })
        .collect();

    let views: Vec<_> = level_boxes.iter().map(|boxes| boxes.view()).collect();
    let boxes = ndarray::concatenate(Axis(0), &views)?.mapv(|value| value as f32);

    Ok(CornerAnchors { boxes, spans })
}

/// Builds the center-form prior boxes `(center_x, center_y, width, height)`
/// of an EfficientDet-style feature pyramid.
///
/// `image_size` is `(height, width)` in pixels. The same `anchor_scale` is
/// used on every level; see [build_prior_boxes_with_scales] for per-level
/// scales.
pub fn build_prior_boxes(
    min_level: usize,
    max_level: usize,
    num_scales: usize,
    aspect_ratios: &[f64],
    anchor_scale: f64,
    image_size: HW<usize>,
) -> Result<PriorBoxes> {
    let num_levels = num_levels(min_level, max_level)?;
    build_prior_boxes_with_scales(
        min_level,
        max_level,
        num_scales,
        aspect_ratios,
        &vec![anchor_scale; num_levels],
        image_size,
    )
}

/// Builds the center-form prior boxes with one anchor scale per level.
pub fn build_prior_boxes_with_scales(
    min_level: usize,
    max_level: usize,
    num_scales: usize,
    aspect_ratios: &[f64],
    anchor_scales: &[f64],
    image_size: HW<usize>,
) -> Result<PriorBoxes> {
    num_levels(min_level, max_level)?;
    let feature_sizes = compute_feature_sizes(image_size, max_level)?;
    let CornerAnchors { boxes, spans } = generate_corner_anchors(
        &feature_sizes,
        min_level,
        max_level,
        num_scales,
        aspect_ratios,
        image_size,
        anchor_scales,
    )?;
    let boxes = to_center_form(boxes.view())?;

    info!(
        "generated {} prior boxes for {}x{} image on levels {}..={}",
        boxes.nrows(),
        image_size.h(),
        image_size.w(),
        min_level,
        max_level
    );

    Ok(PriorBoxes {
        boxes: Arc::new(boxes),
        spans: spans.into(),
    })
}

/// An immutable set of center-form prior boxes.
///
/// Cloning is cheap and shares the underlying array, so one set can serve
/// any number of inference calls and threads.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorBoxes {
    boxes: Arc<Array2<f32>>,
    spans: Arc<[LevelSpan]>,
}

impl PriorBoxes {
    pub fn len(&self) -> usize {
        self.boxes.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `[N, 4]` array of `(center_x, center_y, width, height)` rows.
    pub fn as_array(&self) -> ArrayView2<'_, f32> {
        self.boxes.view()
    }

    pub fn get(&self, index: usize) -> Option<CxCyWH<f32>> {
        (index < self.len()).then(|| self.row_to_rect(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = CxCyWH<f32>> + '_ {
        (0..self.len()).map(move |index| self.row_to_rect(index))
    }

    /// The row ranges of each pyramid level, in level order.
    pub fn level_spans(&self) -> &[LevelSpan] {
        &self.spans
    }

    /// Returns the anchors of one pyramid level.
    pub fn level(&self, level: usize) -> Option<ArrayView2<'_, f32>> {
        let span = self.spans.iter().find(|span| span.level == level)?;
        Some(self.boxes.slice(s![span.range.clone(), ..]))
    }

    /// Converts the set back to corner form `(x_min, y_min, x_max, y_max)`.
    pub fn to_corner_form(&self) -> Result<Array2<f32>> {
        to_corner_form(self.boxes.view())
    }

    fn row_to_rect(&self, index: usize) -> CxCyWH<f32> {
        let row = self.boxes.row(index);
        // widths and heights are positive by construction
        CxCyWH::from_cxcywh([row[0], row[1], row[2], row[3]])
    }
}
