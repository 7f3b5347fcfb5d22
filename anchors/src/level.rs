use crate::{
    common::*,
    geometry::{compute_box_coordinates, AnchorGeometry},
    level_config::LevelConfig,
};

/// Assembles the corner-form boxes of one pyramid level.
///
/// The result has shape `[num_grid_points * combinations, 4]`. Rows are
/// grouped by grid point; within a grid point the combinations appear in
/// configuration order.
pub fn generate_level_boxes(config: &LevelConfig, image_size: HW<usize>) -> Result<Array2<f64>> {
    let geometries = config
        .iter_params()
        .map(|params| compute_box_coordinates(&params, image_size))
        .collect::<Result<Vec<AnchorGeometry>>>()?;

    let num_grid_points = match geometries.first() {
        Some(geometry) => geometry.num_grid_points(),
        None => bail!(AnchorError::ZeroScales),
    };
    ensure!(
        geometries
            .iter()
            .all(|geometry| geometry.num_grid_points() == num_grid_points),
        "combinations of level {} disagree on the grid size",
        config.level
    );

    let num_boxes = num_grid_points * geometries.len();
    let mut values = Vec::with_capacity(num_boxes * 4);
    for point in 0..num_grid_points {
        for geometry in &geometries {
            values.extend(geometry.corner(point));
        }
    }

    debug!(
        "level {}: {} grid points x {} combinations",
        config.level,
        num_grid_points,
        geometries.len()
    );

    Ok(Array2::from_shape_vec((num_boxes, 4), values)?)
}
