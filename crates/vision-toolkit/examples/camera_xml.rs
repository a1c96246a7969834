//! Example: camera-parameter XML round trip.
//!
//! Writes a camera with and without distortion to an XML file, reads one model
//! back, shifts its principal point and saves the result under a second
//! camera name. The selected parameters are printed as JSON.
//!
//! Run from the workspace root:
//!   cargo run -p vision-toolkit --example camera_xml -- --help
//!   cargo run -p vision-toolkit --example camera_xml -- --out /tmp/camera.xml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use vision_toolkit::camera::{
    self, CameraParameters, CameraQuery, ProjectionKind, ProjectionModel, WriteError,
};

#[derive(Parser, Debug)]
#[command(about = "Save and parse camera intrinsic parameters")]
struct Args {
    /// XML file to create or extend
    #[arg(long, default_value = "camera.xml")]
    out: PathBuf,

    #[arg(long, default_value = "myCamera")]
    name: String,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Read back the model with distortion instead of the plain one
    #[arg(long)]
    distortion: bool,
}

/// Saves `params`; a model already present from an earlier run is kept.
fn save_once(path: &Path, params: &CameraParameters) -> Result<()> {
    match camera::save(path, params) {
        Ok(()) => info!("wrote {} model of {:?}", params.model.kind(), params.name),
        Err(WriteError::ModelExists { name, projection }) => {
            info!("{name:?} already has a {projection} model, keeping it");
        }
        Err(err) => {
            return Err(err).with_context(|| format!("saving to {}", path.display()));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let plain = CameraParameters {
        name: args.name.clone(),
        image_width: args.width,
        image_height: args.height,
        model: ProjectionModel::WithoutDistortion {
            px: 1129.0,
            py: 1130.6,
            u0: 317.9,
            v0: 229.1,
        },
    };
    let distorted = CameraParameters {
        model: ProjectionModel::WithDistortion {
            px: 1089.9,
            py: 1090.1,
            u0: 326.1,
            v0: 230.5,
            kud: -0.196,
            kdu: 0.201,
        },
        ..plain.clone()
    };
    for params in [&plain, &distorted] {
        save_once(&args.out, params)?;
    }

    let kind = if args.distortion {
        ProjectionKind::WithDistortion
    } else {
        ProjectionKind::WithoutDistortion
    };
    let query = CameraQuery::new(&args.name, kind).with_image_size(args.width, args.height);
    let mut params = camera::parse(&args.out, &query)
        .with_context(|| format!("parsing {}", args.out.display()))?;
    println!("{params}");

    // Principal point moved to the image centre.
    let (cu, cv) = (f64::from(args.width) / 2.0, f64::from(args.height) / 2.0);
    params.model = match params.model {
        ProjectionModel::WithoutDistortion { px, py, .. } => ProjectionModel::WithoutDistortion {
            px,
            py,
            u0: cu,
            v0: cv,
        },
        ProjectionModel::WithDistortion { px, py, kud, kdu, .. } => {
            ProjectionModel::WithDistortion {
                px,
                py,
                u0: cu,
                v0: cv,
                kud,
                kdu,
            }
        }
    };
    params.name = format!("{}Centered", args.name);
    save_once(&args.out, &params)?;

    let json = serde_json::to_string_pretty(&params).context("serialising parameters")?;
    println!("{json}");
    Ok(())
}
