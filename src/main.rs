use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

use meshinterp::io::{MappedPoint, MeshDump, read_points, write_grid_field, write_mapped_points};
use meshinterp::{
    Grid, InterpConfig, InterpMethod, PointSet, Projection, ScatteredInterpolator, strategy_for,
};

#[derive(Parser, Debug)]
#[command(name = "meshinterp", version, about = "Transfer nodal fields between meshes")]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Interpolation method (linear or cubic)
    #[arg(long, global = true)]
    method: Option<InterpMethod>,

    /// Interpolation plane (xy, xz or yz); detected when omitted
    #[arg(long, global = true)]
    projection: Option<Projection>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample the dump's field on a regular grid over its nodes
    Grid {
        dsp: PathBuf,
        #[arg(long)]
        nx: Option<usize>,
        #[arg(long)]
        ny: Option<usize>,
        #[arg(long, default_value = "grid.json")]
        out: PathBuf,
    },
    /// Interpolate the dump's field at the points of a target list
    Map {
        dsp: PathBuf,
        targets: PathBuf,
        #[arg(long, default_value = "mapped.json")]
        out: PathBuf,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("meshinterp=info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_source(dsp: &Path, config: &InterpConfig) -> Result<PointSet> {
    let dump = MeshDump::read(dsp, &config.dsp)?;
    let projection = match config.projection {
        Some(p) => p,
        None => dump.detect_projection()?,
    };
    let (u, v) = projection.axis_labels();
    tracing::info!("interpolating in the {u}{v} plane");
    let source = dump.boundary_data(projection)?.deduplicated()?;
    tracing::info!(unique = source.len(), "source nodes");
    Ok(source)
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => InterpConfig::from_file(path)?,
        None => InterpConfig::new(),
    };
    if let Some(method) = cli.method {
        config.method = method;
    }
    if let Some(projection) = cli.projection {
        config.projection = Some(projection);
    }

    match cli.command {
        Commands::Grid { dsp, nx, ny, out } => {
            let source = load_source(&dsp, &config)?;
            let grid = Grid::spanning(
                &source.points,
                nx.unwrap_or(config.grid_nx),
                ny.unwrap_or(config.grid_ny),
            )?;
            let interp = ScatteredInterpolator::from_point_set(&source, config.method)?;
            let field = interp.evaluate_grid(&grid)?;
            tracing::info!(
                method = %config.method,
                coverage = field.coverage(),
                "grid evaluated"
            );
            write_grid_field(&out, &field)?;
            println!("{}", out.display());
        }
        Commands::Map { dsp, targets, out } => {
            let source = load_source(&dsp, &config)?;
            let queries = read_points(&targets)?;
            let strategy = strategy_for(config.method);
            let values = strategy.interpolate(&source, &queries)?;
            let outside = values.iter().filter(|v| v.is_nan()).count();
            tracing::info!(
                strategy = strategy.name(),
                targets = queries.len(),
                outside,
                "targets mapped"
            );
            write_mapped_points(&out, &MappedPoint::zip(&queries, &values))?;
            println!("{}", out.display());
        }
    }
    Ok(())
}
