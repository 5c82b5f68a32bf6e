mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(
    name = "canopy",
    version,
    about = "Restoration decision engine: site suitability, species matching and risk"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a site from a raw environmental reading (JSON)
    Assess {
        /// Path to a raw reading JSON file with soil/climate/vegetation keys
        input_file: PathBuf,

        /// Custom species catalog JSON (default: builtin catalog)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Daily weather forecast JSON (array of {temp_c, precipitation_mm, humidity_pct})
        #[arg(short, long, value_name = "FILE")]
        forecast: Option<PathBuf>,

        /// Stand age in years, used by the heat stress hazard
        #[arg(long, default_value_t = 1.0)]
        tree_age: f64,

        /// Number of species recommendations to show
        #[arg(short = 'n', long, default_value_t = 5)]
        top_species: usize,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show per-species pros/cons and the full hazard breakdown
        #[arg(long)]
        verbose: bool,
    },
    /// Assess a site under a hypothetical stress scenario
    Simulate {
        /// Path to a raw reading JSON file
        input_file: PathBuf,

        /// Scenario: drought, flood, heat or species_failure
        scenario: String,

        /// Scenario intensity: low, medium or high
        #[arg(short, long, default_value = "medium")]
        intensity: String,

        /// Scenario duration in days (informational)
        #[arg(short, long, default_value_t = 30)]
        duration: u32,

        /// Custom species catalog JSON (default: builtin catalog)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Daily weather forecast JSON, perturbed along with the reading
        #[arg(short, long, value_name = "FILE")]
        forecast: Option<PathBuf>,

        /// Number of species recommendations to show
        #[arg(short = 'n', long, default_value_t = 5)]
        top_species: usize,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect species catalogs
    Species {
        #[command(subcommand)]
        action: SpeciesAction,
    },
}

#[derive(Subcommand)]
enum SpeciesAction {
    /// List species in the builtin catalog
    List {
        /// Custom species catalog JSON instead of the builtin one
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
    /// Show one species profile in detail
    Show {
        /// Species common name (case-insensitive)
        name: String,

        /// Custom species catalog JSON instead of the builtin one
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
    /// Validate a custom catalog file
    Validate {
        /// Path to JSON catalog file
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            input_file,
            catalog,
            forecast,
            tree_age,
            top_species,
            output,
            verbose,
        } => commands::assess::run(
            input_file,
            catalog,
            forecast,
            tree_age,
            top_species,
            &output,
            verbose,
        ),
        Commands::Simulate {
            input_file,
            scenario,
            intensity,
            duration,
            catalog,
            forecast,
            top_species,
            output,
        } => commands::simulate::run(
            input_file,
            &scenario,
            &intensity,
            duration,
            catalog,
            forecast,
            top_species,
            &output,
        ),
        Commands::Species { action } => match action {
            SpeciesAction::List { catalog } => commands::species::list(catalog),
            SpeciesAction::Show { name, catalog } => commands::species::show(&name, catalog),
            SpeciesAction::Validate { file } => commands::species::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
