use anchors::{Config, EfficientDet};
use anyhow::Result;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAMES: &[&str] = &["efficientdet-d0.json5", "custom.json5", "square.json5"];

lazy_static::lazy_static! {
    static ref CONFIG_DIR: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("cfg");
    static ref CONFIG_FILES: Vec<PathBuf> = {
        CONFIG_FILE_NAMES.iter().map(|file_name| CONFIG_DIR.join(file_name)).collect()
    };
}

#[test]
fn config_files_build_test() -> Result<()> {
    CONFIG_FILES.iter().try_for_each(|path| -> Result<_> {
        let config = Config::open(path)?;
        let anchors = config.anchor_config();
        let priors = anchors.build()?;

        let [height, width] = anchors.image_size;
        let expect: usize = (anchors.min_level..=anchors.max_level)
            .map(|level| {
                let stride = 1 << level;
                let rows = (height + stride - 1) / stride;
                let cols = (width + stride - 1) / stride;
                rows * cols * anchors.num_combinations()
            })
            .sum();
        assert_eq!(priors.len(), expect, "{}", path.display());
        Ok(())
    })?;
    Ok(())
}

#[test]
fn preset_file_test() -> Result<()> {
    let config = Config::open(CONFIG_DIR.join("efficientdet-d0.json5"))?;
    assert_eq!(config.anchor_config(), EfficientDet::D0.anchor_config());
    assert_eq!(config.anchor_config().build()?.len(), 49104);
    Ok(())
}

#[test]
fn missing_file_test() {
    assert!(Config::open(CONFIG_DIR.join("no-such-file.json5")).is_err());
}
