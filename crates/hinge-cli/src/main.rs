//! hinges CLI - build print-in-place hinges and report their geometry.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`; the JSON
//! summary goes to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hinge_builder::{
    make_flat_hinge, make_side_hinge, sample_hinges, FlatHingeOptions, HingeConfig, KernelBundle,
    SideHingeOptions,
};
use hinge_kernel::{MockKernel, TruckKernel};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod summary;

use summary::{summarize, ShapeSummary};

#[derive(Parser)]
#[command(name = "hinges")]
#[command(about = "Parametric print-in-place hinge generator", long_about = None)]
struct Cli {
    /// Geometry kernel used to build the shapes
    #[arg(long, value_enum, default_value_t = KernelKind::Mock)]
    kernel: KernelKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KernelKind {
    /// Bounding-box approximation, fast and deterministic
    Mock,
    /// B-rep geometry from truck. Experimental: truck booleans fail on
    /// the coplanar faces of full hinges
    Truck,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the two sample hinges side by side
    Samples,
    /// Build every hinge listed in a TOML file
    Build {
        /// Path to the hinge list
        config: PathBuf,
    },
    /// Build a single side hinge
    Side {
        #[arg(long)]
        height: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        hinge_radius: Option<f64>,
        #[arg(long, default_value_t = 0.4)]
        tolerance: f64,
        #[arg(long, default_value_t = 2)]
        n_couples: usize,
        #[arg(long, default_value_t = 0.4)]
        back_tolerance: f64,
    },
    /// Build a single flat hinge
    Flat {
        #[arg(long)]
        height: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        base_height: f64,
        #[arg(long, default_value_t = 0.4)]
        tolerance: f64,
        #[arg(long, default_value_t = 2)]
        n_couples: usize,
        /// Chamfer on the inner flap edges, 0 to disable
        #[arg(long, default_value_t = 0.12)]
        edge_chamfer: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hinges=info,hinge_builder=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut kernel = make_kernel(cli.kernel);
    let kb = kernel.as_mut();

    let summaries = match cli.command {
        Commands::Samples => build_samples(kb)?,
        Commands::Build { config } => build_config(kb, &config)?,
        Commands::Side {
            height,
            width,
            hinge_radius,
            tolerance,
            n_couples,
            back_tolerance,
        } => {
            let options = SideHingeOptions {
                hinge_radius,
                tolerance,
                n_couples,
                back_tolerance,
            };
            let result = make_side_hinge(kb, height, width, &options)
                .context("building side hinge")?;
            vec![summarize(kb, "side", &result.hinge, Some(result.hinge_width))?]
        }
        Commands::Flat {
            height,
            width,
            base_height,
            tolerance,
            n_couples,
            edge_chamfer,
        } => {
            let options = FlatHingeOptions {
                tolerance,
                n_couples,
                edge_chamfer: Some(edge_chamfer),
            };
            let result = make_flat_hinge(kb, height, width, base_height, &options)
                .context("building flat hinge")?;
            vec![summarize(kb, "flat", &result.hinge, Some(result.hinge_width))?]
        }
    };

    info!(shapes = summaries.len(), "done");
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

fn make_kernel(kind: KernelKind) -> Box<dyn KernelBundle> {
    match kind {
        KernelKind::Mock => Box::new(MockKernel::new()),
        KernelKind::Truck => Box::new(TruckKernel::new()),
    }
}

fn build_samples(kb: &mut dyn KernelBundle) -> Result<Vec<ShapeSummary>> {
    let shapes = sample_hinges(kb).context("building sample hinges")?;
    let kb = &*kb;
    shapes
        .iter()
        .map(|s| summarize(kb, &s.name, &s.shape, None))
        .collect()
}

fn build_config(kb: &mut dyn KernelBundle, path: &Path) -> Result<Vec<ShapeSummary>> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = HingeConfig::from_toml_str(&source)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!(hinges = config.hinges.len(), "building config");
    let built = config.build(kb).context("building configured hinges")?;
    let kb = &*kb;
    built
        .iter()
        .map(|h| summarize(kb, &h.name, &h.shape, Some(h.hinge_width)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_kernel_and_subcommand() {
        let cli = Cli::try_parse_from(["hinges", "--kernel", "truck", "samples"]).unwrap();
        assert_eq!(cli.kernel, KernelKind::Truck);
        assert!(matches!(cli.command, Commands::Samples));
    }

    #[test]
    fn test_side_defaults_match_builder_defaults() {
        let cli =
            Cli::try_parse_from(["hinges", "side", "--height", "60", "--width", "20"]).unwrap();
        assert_eq!(cli.kernel, KernelKind::Mock);
        match cli.command {
            Commands::Side {
                hinge_radius,
                tolerance,
                n_couples,
                back_tolerance,
                ..
            } => {
                let defaults = SideHingeOptions::default();
                assert_eq!(hinge_radius, defaults.hinge_radius);
                assert_eq!(tolerance, defaults.tolerance);
                assert_eq!(n_couples, defaults.n_couples);
                assert_eq!(back_tolerance, defaults.back_tolerance);
            }
            _ => panic!("expected side command"),
        }
    }

    #[test]
    fn test_default_kernel_builds_samples() {
        let cli = Cli::try_parse_from(["hinges", "samples"]).unwrap();
        let mut kernel = make_kernel(cli.kernel);
        let summaries = build_samples(kernel.as_mut()).unwrap();
        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Side hinge", "Flat hinge"]);
        assert!(summaries.iter().all(|s| s.components == 1));
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let mut kernel = make_kernel(KernelKind::Mock);
        let path = PathBuf::from("/nonexistent/hinges.toml");
        let err = build_config(kernel.as_mut(), &path).unwrap_err();
        assert!(err.to_string().contains("hinges.toml"));
    }
}
