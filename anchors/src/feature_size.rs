//! Feature map resolutions of the downsampling pyramid.

use crate::common::*;

/// Deepest pyramid level accepted. Every extent has shrunk to one well before it.
pub const MAX_LEVEL_LIMIT: usize = usize::BITS as usize;

/// Downsamples one extent the way a stride-2 convolution with "same" padding does.
pub fn downsample(size: usize) -> usize {
    (size - 1) / 2 + 1
}

/// Computes the feature map size of every pyramid level up to `max_level`.
///
/// The returned vector has `max_level + 1` entries. Entry 0 is the input image
/// size and entry `k` is obtained by downsampling entry `k - 1` once.
pub fn compute_feature_sizes(image_size: HW<usize>, max_level: usize) -> Result<Vec<HW<usize>>> {
    let [height, width] = image_size.hw();
    ensure!(
        height > 0 && width > 0,
        AnchorError::EmptyImage { height, width }
    );
    ensure!(
        max_level <= MAX_LEVEL_LIMIT,
        AnchorError::LevelTooDeep {
            max_level,
            limit: MAX_LEVEL_LIMIT
        }
    );

    let sizes: Vec<_> = (0..max_level)
        .scan(image_size, |prev, _| {
            *prev = HW::from_hw([downsample(prev.h()), downsample(prev.w())]);
            Some(*prev)
        })
        .collect();

    Ok(std::iter::once(image_size).chain(sizes).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_sizes_of_odd_image() -> Result<()> {
        let sizes = compute_feature_sizes(HW::from_hw([300, 300]), 1)?;
        assert_eq!(sizes, vec![HW::from_hw([300, 300]), HW::from_hw([150, 150])]);
        Ok(())
    }

    #[test]
    fn feature_sizes_round_up() -> Result<()> {
        let sizes = compute_feature_sizes(HW::from_hw([300, 75]), 4)?;
        let hw: Vec<_> = sizes.iter().map(|size| size.hw()).collect();
        assert_eq!(
            hw,
            vec![[300, 75], [150, 38], [75, 19], [38, 10], [19, 5]]
        );
        Ok(())
    }

    #[test]
    fn feature_sizes_of_level_zero() -> Result<()> {
        let sizes = compute_feature_sizes(HW::from_hw([7, 9]), 0)?;
        assert_eq!(sizes, vec![HW::from_hw([7, 9])]);
        Ok(())
    }

    #[test]
    fn single_pixel_stays_single_pixel() -> Result<()> {
        let sizes = compute_feature_sizes(HW::from_hw([1, 1]), 3)?;
        assert!(sizes.iter().all(|size| size.hw() == [1, 1]));
        Ok(())
    }

    #[test]
    fn reject_unbounded_depth() -> Result<()> {
        let sizes = compute_feature_sizes(HW::from_hw([usize::MAX, 1]), MAX_LEVEL_LIMIT)?;
        assert_eq!(sizes.last().map(|size| size.hw()), Some([1, 1]));

        let err = compute_feature_sizes(HW::from_hw([512, 512]), usize::MAX).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnchorError>(),
            Some(&AnchorError::LevelTooDeep {
                max_level: usize::MAX,
                limit: MAX_LEVEL_LIMIT
            })
        );
        Ok(())
    }

    #[test]
    fn reject_empty_image() {
        let err = compute_feature_sizes(HW::from_hw([0, 512]), 3).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnchorError>(),
            Some(&AnchorError::EmptyImage {
                height: 0,
                width: 512
            })
        );
    }
}
