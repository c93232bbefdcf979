use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use vf_case::{Case, CaseError, CompiledCase, compile_case, load_case, reference_case};
use vf_solver::{SaturationOptions, SolverError, bubble_pressure, dew_pressure, solve_separator};
use vf_thermo::{FugacityModel, Phase, ThermoError};

mod report;

use report::{FlashReport, PhaseVolumes, render_saturation};

#[derive(Parser)]
#[command(name = "vf-cli")]
#[command(about = "vleflash CLI - isothermal vapor-liquid flash drum", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flash the feed and split it into vapor and liquid flows
    Flash {
        /// Path to a YAML or JSON case file (defaults to the built-in case)
        case_path: Option<PathBuf>,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Bubble point pressure of the feed at the case temperature
    Bubble {
        /// Path to a YAML or JSON case file (defaults to the built-in case)
        case_path: Option<PathBuf>,
    },
    /// Dew point pressure of the feed at the case temperature
    Dew {
        /// Path to a YAML or JSON case file (defaults to the built-in case)
        case_path: Option<PathBuf>,
    },
    /// Validate case file syntax and values
    Validate {
        /// Path to the case file
        case_path: PathBuf,
    },
    /// Print the built-in case as YAML
    ShowDefault,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Case(#[from] CaseError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Flash { case_path, json } => cmd_flash(case_path.as_deref(), json),
        Commands::Bubble { case_path } => cmd_saturation(case_path.as_deref(), Saturation::Bubble),
        Commands::Dew { case_path } => cmd_saturation(case_path.as_deref(), Saturation::Dew),
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::ShowDefault => cmd_show_default(),
    }
}

fn load_or_default(case_path: Option<&Path>) -> CliResult<Case> {
    match case_path {
        Some(path) => Ok(load_case(path)?),
        None => Ok(reference_case()),
    }
}

fn compile(case_path: Option<&Path>) -> CliResult<CompiledCase> {
    let case = load_or_default(case_path)?;
    Ok(compile_case(&case)?)
}

fn cmd_flash(case_path: Option<&Path>, json: bool) -> CliResult<()> {
    let compiled = compile(case_path)?;

    let start = Instant::now();
    let sol = solve_separator(&compiled.eos, &compiled.spec, &compiled.options)?;
    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        mass_balance = sol.mass_balance_error(),
        "flash finished"
    );

    let (t, p) = (compiled.spec.t, compiled.spec.p);
    let volumes = PhaseVolumes {
        vapor: compiled.eos.molar_volume(&sol.flash.y, t, p, Phase::Vapor)?,
        liquid: compiled.eos.molar_volume(&sol.flash.x, t, p, Phase::Liquid)?,
    };

    let report = FlashReport::new(
        &compiled.name,
        compiled.eos.name(),
        &compiled.component_names(),
        &compiled.spec,
        &sol,
        volumes,
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Saturation {
    Bubble,
    Dew,
}

fn cmd_saturation(case_path: Option<&Path>, kind: Saturation) -> CliResult<()> {
    let compiled = compile(case_path)?;
    let options = SaturationOptions::default();
    let names = compiled.component_names();
    let text = match kind {
        Saturation::Bubble => {
            let res = bubble_pressure(&compiled.eos, &compiled.spec.z, compiled.spec.t, &options)?;
            render_saturation("Bubble", "vapor", &names, &res)
        }
        Saturation::Dew => {
            let res = dew_pressure(&compiled.eos, &compiled.spec.z, compiled.spec.t, &options)?;
            render_saturation("Dew", "liquid", &names, &res)
        }
    };
    print!("{text}");
    Ok(())
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = load_case(case_path)?;
    compile_case(&case)?;
    println!("✓ Case is valid");
    Ok(())
}

fn cmd_show_default() -> CliResult<()> {
    print!("{}", serde_yaml::to_string(&reference_case())?);
    Ok(())
}
