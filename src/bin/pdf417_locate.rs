use clap::{Parser, Subcommand, ValueEnum};
use image::GenericImageView;
use pdf417_locator::detector::anchor_scan::GuardQualifier;
use pdf417_locator::{GuardSide, LocateError, Locator, LocatorConfig, Strictness};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

const QUIET_RATIO: f32 = 0.75;
const MIN_INNER_TRANSITIONS: usize = 2;

#[derive(Parser)]
#[command(name = "pdf417-locate", version, about = "Locate PDF417 barcodes by their edge guards")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrictnessArg {
    Lax,
    Basic,
    Strict,
}

impl From<StrictnessArg> for Strictness {
    fn from(arg: StrictnessArg) -> Self {
        match arg {
            StrictnessArg::Lax => Strictness::Lax,
            StrictnessArg::Basic => Strictness::Basic,
            StrictnessArg::Strict => Strictness::Strict,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Left,
    Right,
}

impl From<SideArg> for GuardSide {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Left => GuardSide::Left,
            SideArg::Right => GuardSide::Right,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Locate every barcode in an image, best first
    Locate {
        #[arg(long)]
        image: PathBuf,
        #[arg(long, value_enum, default_value = "basic")]
        strictness: StrictnessArg,
        /// TOML file overriding the preset
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Trace one edge guard and print its endpoints
    Edge {
        #[arg(long)]
        image: PathBuf,
        #[arg(long, value_enum)]
        side: SideArg,
        #[arg(long, value_enum, default_value = "basic")]
        strictness: StrictnessArg,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Only keep anchors with a quiet zone outside and narrow bars inside
        #[arg(long)]
        qualify: bool,
    },
    /// Print a preset as TOML
    Config {
        #[arg(long, value_enum, default_value = "basic")]
        strictness: StrictnessArg,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Locate {
            image,
            strictness,
            config,
        } => locate_cmd(&image, strictness.into(), config.as_deref()),
        Command::Edge {
            image,
            side,
            strictness,
            config,
            qualify,
        } => edge_cmd(&image, side.into(), strictness.into(), config.as_deref(), qualify),
        Command::Config { strictness } => config_cmd(strictness.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_config(strictness: Strictness, path: Option<&Path>) -> Result<LocatorConfig, LocateError> {
    match path {
        Some(path) => LocatorConfig::load(path),
        None => Ok(LocatorConfig::preset(strictness)),
    }
}

fn locate_cmd(image: &Path, strictness: Strictness, config: Option<&Path>) -> Result<(), LocateError> {
    let locator = Locator::new(load_config(strictness, config)?)?;
    let decoded = image::open(image)?;

    let start = Instant::now();
    let barcodes = locator.locate(&decoded);
    let elapsed = start.elapsed();

    let (width, height) = decoded.dimensions();
    println!("Image: {} ({}x{})", image.display(), width, height);
    println!("Found {} barcodes in {:.2?}", barcodes.len(), elapsed);
    for (i, barcode) in barcodes.iter().enumerate() {
        let [ul, ur, lr, ll] = barcode.corners();
        println!(
            "  #{} {:?} score={:.2} ul=({:.1}, {:.1}) ur=({:.1}, {:.1}) lr=({:.1}, {:.1}) ll=({:.1}, {:.1})",
            i,
            barcode.orientation,
            barcode.score,
            ul.x,
            ul.y,
            ur.x,
            ur.y,
            lr.x,
            lr.y,
            ll.x,
            ll.y
        );
    }
    Ok(())
}

fn edge_cmd(
    image: &Path,
    side: GuardSide,
    strictness: Strictness,
    config: Option<&Path>,
    qualify: bool,
) -> Result<(), LocateError> {
    let config = load_config(strictness, config)?;
    let mut locator = Locator::new(config)?;
    if qualify {
        locator = locator.with_qualifier(GuardQualifier {
            side,
            black_threshold: config.edge.black_threshold,
            min_quiet_ratio: QUIET_RATIO,
            min_transitions: MIN_INNER_TRANSITIONS,
        });
    }
    let decoded = image::open(image)?;

    match locator.locate_edge(&decoded, side) {
        Some((upper, lower)) => println!(
            "{:?} guard: upper=({:.1}, {:.1}) lower=({:.1}, {:.1})",
            side, upper.x, upper.y, lower.x, lower.y
        ),
        None => println!("{:?} guard: not found", side),
    }
    Ok(())
}

fn config_cmd(strictness: Strictness) -> Result<(), LocateError> {
    print!("{}", LocatorConfig::preset(strictness).to_toml_string()?);
    Ok(())
}
