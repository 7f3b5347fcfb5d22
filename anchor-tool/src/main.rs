use anchors::{AnchorConfig, Config, EfficientDet, PriorBoxes};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use log::info;
use prettytable::{cell, row, Table};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Parser)]
/// Inspect and export EfficientDet prior boxes.
enum Opts {
    /// Print the anchor layout of each pyramid level.
    Info {
        #[clap(flatten)]
        source: Source,
    },
    /// Write the anchors to a CSV file.
    Dump {
        #[clap(flatten)]
        source: Source,
        /// output CSV file
        #[clap(long)]
        output: PathBuf,
        /// write (x_min, y_min, x_max, y_max) instead of center form
        #[clap(long)]
        corner: bool,
    },
    /// List the built-in presets.
    Presets,
}

#[derive(Debug, Clone, Args)]
struct Source {
    /// anchor configuration file
    #[clap(long, conflicts_with = "preset")]
    config: Option<PathBuf>,
    /// built-in preset, such as "efficientdet-d0" or "d0"
    #[clap(long)]
    preset: Option<EfficientDet>,
}

impl Source {
    fn load(&self) -> Result<AnchorConfig> {
        let config = match (&self.config, self.preset) {
            (Some(path), None) => Config::open(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?
                .anchor_config(),
            (None, Some(preset)) => preset.anchor_config(),
            (None, None) => bail!("either --config or --preset must be given"),
            (Some(_), Some(_)) => bail!("--config and --preset cannot be used together"),
        };
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CenterRecord {
    index: usize,
    level: usize,
    cx: f32,
    cy: f32,
    w: f32,
    h: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CornerRecord {
    index: usize,
    level: usize,
    x_min: f32,
    y_min: f32,
    x_max: f32,
    y_max: f32,
}

fn main() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    match Opts::parse() {
        Opts::Info { source } => info(&source.load()?)?,
        Opts::Dump {
            source,
            output,
            corner,
        } => dump(&source.load()?, output, corner)?,
        Opts::Presets => presets(),
    }

    Ok(())
}

fn info(config: &AnchorConfig) -> Result<()> {
    let priors = config.build()?;
    let image_size = config.image_size();

    let mut table = Table::new();
    table.add_row(row![
        "level",
        "feature size",
        "stride",
        "grid points",
        "anchors",
        "rows"
    ]);

    priors.level_spans().iter().for_each(|span| {
        let feature_size = span.feature_size;
        let stride_y = image_size.h() as f64 / feature_size.h() as f64;
        let stride_x = image_size.w() as f64 / feature_size.w() as f64;
        table.add_row(row![
            span.level,
            format!("{}x{}", feature_size.h(), feature_size.w()),
            format!("{:.2}x{:.2}", stride_y, stride_x),
            feature_size.h() * feature_size.w(),
            span.len(),
            format!("{:?}", span.range),
        ]);
    });

    table.printstd();
    println!(
        "{} anchors, {} per grid point",
        priors.len(),
        config.num_combinations()
    );

    Ok(())
}

fn dump(config: &AnchorConfig, output: impl AsRef<Path>, corner: bool) -> Result<()> {
    let output = output.as_ref();
    let priors = config.build()?;
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    if corner {
        let corners = priors.to_corner_form()?;
        for_each_row(&priors, |index, level| {
            let row = corners.row(index);
            writer.serialize(CornerRecord {
                index,
                level,
                x_min: row[0],
                y_min: row[1],
                x_max: row[2],
                y_max: row[3],
            })?;
            Ok(())
        })?;
    } else {
        let centers = priors.as_array();
        for_each_row(&priors, |index, level| {
            let row = centers.row(index);
            writer.serialize(CenterRecord {
                index,
                level,
                cx: row[0],
                cy: row[1],
                w: row[2],
                h: row[3],
            })?;
            Ok(())
        })?;
    }

    writer.flush()?;
    info!("wrote {} anchors to {}", priors.len(), output.display());
    Ok(())
}

fn for_each_row<F>(priors: &PriorBoxes, mut f: F) -> Result<()>
where
    F: FnMut(usize, usize) -> Result<()>,
{
    priors.level_spans().iter().try_for_each(|span| {
        span.range
            .clone()
            .try_for_each(|index| f(index, span.level))
    })
}

fn presets() {
    let mut table = Table::new();
    table.add_row(row!["preset", "input size", "anchor scale"]);
    EfficientDet::iter().for_each(|preset| {
        table.add_row(row![preset, preset.input_size(), preset.anchor_scale()]);
    });
    table.printstd();
}
