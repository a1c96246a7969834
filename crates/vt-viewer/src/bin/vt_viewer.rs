use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use vt_display::{io, open_display, show_until_click};

#[derive(Parser, Debug)]
#[command(name = "vt_viewer")]
#[command(about = "Display an image until a mouse click")]
struct Cli {
    /// Image file (PNG, JPEG, PNM, BMP or TIFF).
    image: PathBuf,
    #[arg(long, default_value = "My image")]
    title: String,
    /// Do not open a window; Enter on stdin stands for the click.
    #[arg(long)]
    headless: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let img = io::read_rgba(&cli.image)
        .with_context(|| format!("Cannot read image \"{}\"", cli.image.display()))?;
    info!(
        "{}: {}x{} (height x width)",
        cli.image.display(),
        img.height(),
        img.width()
    );

    let mut display = open_display(&img, cli.headless)
        .with_context(|| format!("Cannot display image \"{}\"", cli.image.display()))?;
    println!("A click to quit...");
    let click = show_until_click(&mut display, &img, &cli.title)
        .with_context(|| format!("Cannot display image \"{}\"", cli.image.display()))?;
    info!("clicked at ({:.1}, {:.1})", click.row, click.col);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::Parser;

    use super::{Cli, run};

    #[test]
    fn title_defaults_to_my_image() {
        let cli = Cli::try_parse_from(["vt_viewer", "lena.png"]).expect("valid args");
        assert_eq!(cli.title, "My image");
        assert!(!cli.headless);

        let cli = Cli::try_parse_from(["vt_viewer", "lena.png", "--title", "Lena", "--headless"])
            .expect("valid args");
        assert_eq!(cli.title, "Lena");
        assert!(cli.headless);
    }

    #[test]
    fn missing_image_argument_is_a_usage_error() {
        let err = Cli::try_parse_from(["vt_viewer"]).expect_err("image is required");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unreadable_image_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.png");
        let args = [
            OsStr::new("vt_viewer"),
            path.as_os_str(),
            OsStr::new("--headless"),
        ];
        let cli = Cli::try_parse_from(args).expect("valid args");
        let err = run(&cli).expect_err("file does not exist");
        assert_eq!(
            err.to_string(),
            format!("Cannot read image \"{}\"", path.display())
        );
    }
}
