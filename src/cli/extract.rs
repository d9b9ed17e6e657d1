//! Extract command handler
//!
//! Reads the annotation export, samples pseudo-points and writes them to a
//! timestamped file in the output directory.

use crate::annotations::read_annotations;
use crate::config::{Config, PathsFile};
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::hex::H3Resolver;
use crate::pipeline;
use crate::rng::get_source;
use crate::sampling::PseudoPointGenerator;
use clap::Args;
use std::path::{Path, PathBuf};

/// Extract command arguments
#[derive(Args)]
pub struct ExtractArgs {
    /// Annotation export (CSV or JSON)
    #[arg(long, short = 'a')]
    pub annotations: Option<PathBuf>,

    /// Directory for the output file
    #[arg(long, short = 'o', conflicts_with = "paths_file")]
    pub output_dir: Option<PathBuf>,

    /// JSON paths file whose "annotation" entry is the output directory
    #[arg(long)]
    pub paths_file: Option<PathBuf>,

    /// Sampling mode: polygon or circle
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    /// Extra samples for the coarsest resolution
    #[arg(long)]
    pub max_amount: Option<i64>,

    /// Seed for reproducible output
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Print points to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the extract command
pub fn run(args: ExtractArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    super::init_logging();

    // Settle every configuration value before touching any rows
    let mut config = Config::load()?;
    apply_overrides(&mut config, &args)?;
    config.validate()?;

    let sampling = config.sampling_config()?;
    let formatter = get_formatter(&config.output.format).ok_or_else(|| {
        Error::Config(format!("Unknown format: {}", config.output.format))
    })?;
    let output_dir = PathBuf::from(&config.paths.output_dir);
    if !args.stdout && !output_dir.is_dir() {
        return Err(Error::Config(format!(
            "Output directory {} does not exist",
            output_dir.display()
        )));
    }

    let annotations = read_annotations(Path::new(&config.paths.annotations))?;
    let rng = get_source(config.sampling.seed);
    let generator = PseudoPointGenerator::new(sampling, rng.as_ref());

    let report = pipeline::run(&annotations, H3Resolver::new(), &generator)?;

    if args.stdout {
        print!("{}", formatter.format(&report.points)?);
    } else {
        let path = pipeline::write_report(&report, &output_dir, formatter.as_ref())?;
        println!("{}", path.display());
    }

    Ok(())
}

/// Fold command-line flags into the loaded configuration
fn apply_overrides(config: &mut Config, args: &ExtractArgs) -> Result<()> {
    if let Some(path) = &args.annotations {
        config.paths.annotations = path.display().to_string();
    }
    if let Some(dir) = &args.output_dir {
        config.paths.output_dir = dir.display().to_string();
    }
    if let Some(paths_file) = &args.paths_file {
        config.paths.output_dir = PathsFile::load(paths_file)?.annotation;
    }
    if let Some(mode) = &args.mode {
        config.sampling.mode = mode.clone();
    }
    if let Some(amount) = args.max_amount {
        config.sampling.max_amount = amount;
    }
    if args.seed.is_some() {
        config.sampling.seed = args.seed;
    }
    if let Some(format) = &args.format {
        config.output.format = format.clone();
    }
    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
