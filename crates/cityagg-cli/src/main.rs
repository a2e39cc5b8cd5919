//! cityagg CLI: run, validate, and explain operation files against city data.

use clap::{Args, Parser, Subcommand};
use cityagg_core::prelude::{Error as CoreError, JobConfig, RunConfig};
use cityagg_exec::{process, Engine, Inputs};
use cityagg_operators::describe;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cityagg")]
#[command(about = "Aggregate city data with operations declared in XML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input/output locations shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
struct PathArgs {
    /// Entity (city) XML file
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Operation XML file
    #[arg(short, long)]
    operations: Option<PathBuf>,

    /// YAML job file providing any of the paths and options
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate all operations and write the results document
    Run {
        #[command(flatten)]
        paths: PathArgs,

        /// Results XML file to write
        #[arg(long)]
        output: Option<PathBuf>,

        /// Spaces per indentation level (overrides config)
        #[arg(long)]
        indent: Option<usize>,

        /// Create missing parent directories of the output file
        #[arg(long)]
        create_dirs: bool,

        /// Also write the run report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Load both inputs and resolve every operation without writing output
    Validate {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Show how each operation resolves and how many cities it selects
    Explain {
        #[command(flatten)]
        paths: PathArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            paths,
            output,
            indent,
            create_dirs,
            report,
        } => match run(&paths, output, indent, create_dirs, report) {
            Ok(true) => {}
            // Already logged by the driver; no output was written.
            Ok(false) => std::process::exit(1),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        },
        Commands::Validate { paths } => {
            if let Err(e) = validate(&paths) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Inputs are valid");
        }
        Commands::Explain { paths } => {
            if let Err(e) = explain(&paths) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Returns `Ok(false)` when the run was aborted and logged.
fn run(
    paths: &PathArgs,
    output: Option<PathBuf>,
    indent: Option<usize>,
    create_dirs: bool,
    report_path: Option<PathBuf>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut config = RunConfig::from_env();
    let job = load_job(paths)?;
    apply_overrides(&mut config, job.as_ref(), paths);
    if let Some(path) = output {
        config.output_file = path;
    }
    if let Some(n) = indent {
        config.indent = n;
    }
    if create_dirs {
        config.create_parent_dirs = true;
    }
    config.validate()?;
    tracing::info!(
        data = %config.data_file.display(),
        operations = %config.operations_file.display(),
        output = %config.output_file.display(),
        "starting run"
    );

    let Some(report) = process(config)? else {
        return Ok(false);
    };

    println!("✓ Run completed");
    println!("  Results: {}", report.results.len());
    println!("  Duration: {}ms", report.duration_ms());
    if let Some(digest) = &report.outputs_digest {
        println!("  Output digest: {}", digest.short(16));
    }

    if let Some(path) = report_path {
        fs::write(&path, report.to_json_pretty()?)?;
        println!("  Report: {}", path.display());
    }

    Ok(true)
}

fn validate(paths: &PathArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(input_config(paths)?);
    let inputs = engine.load()?;
    check_operations(&inputs)
}

/// Every operation must resolve and select at least one city, as a run requires.
fn check_operations(inputs: &Inputs) -> Result<(), Box<dyn std::error::Error>> {
    for op in &inputs.operations {
        let plan =
            describe(op, &inputs.entities).map_err(|e| format!("operation '{}': {}", op.name, e))?;
        if plan.matched == 0 {
            let empty = CoreError::EmptySelection {
                operation: plan.name,
                filter: plan.filter,
            };
            return Err(format!("operation '{}': {}", op.name, empty).into());
        }
    }
    Ok(())
}

fn explain(paths: &PathArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(input_config(paths)?);
    let inputs = engine.load()?;

    println!("Operation Plan");
    println!("==============");
    println!();
    println!("Entities: {}", inputs.entities.len());
    println!("Operations: {}", inputs.operations.len());
    println!("Inputs digest: {}", inputs.digest.short(16));
    println!();

    for (i, op) in inputs.operations.iter().enumerate() {
        match describe(op, &inputs.entities) {
            Ok(plan) => {
                let kind = if plan.path.is_integral() {
                    "integer"
                } else {
                    "float"
                };
                println!(
                    "  {}. {} = {}({}, {}) over /{}/ - {} match(es)",
                    i + 1,
                    plan.name,
                    plan.path.function,
                    plan.path.attribute,
                    kind,
                    plan.filter,
                    plan.matched
                );
                if plan.matched == 0 {
                    println!("     ! no cities match; a run would abort here");
                }
            }
            Err(e) => println!("  {}. {} - error: {}", i + 1, op.name, e),
        }
    }

    Ok(())
}

fn load_job(paths: &PathArgs) -> Result<Option<JobConfig>, Box<dyn std::error::Error>> {
    match &paths.config {
        Some(path) => {
            let yaml = fs::read_to_string(path)
                .map_err(|e| format!("reading job file {}: {}", path.display(), e))?;
            Ok(Some(JobConfig::from_yaml(&yaml)?))
        }
        None => Ok(None),
    }
}

fn input_config(paths: &PathArgs) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let mut config = RunConfig::from_env();
    let job = load_job(paths)?;
    apply_overrides(&mut config, job.as_ref(), paths);
    config.validate_inputs()?;
    Ok(config)
}

/// Job file over env defaults, then explicit flags over the job file.
fn apply_overrides(cfg: &mut RunConfig, job: Option<&JobConfig>, paths: &PathArgs) {
    if let Some(job) = job {
        cfg.apply_job(job);
    }
    if let Some(data) = &paths.data {
        cfg.data_file = data.clone();
    }
    if let Some(ops) = &paths.operations {
        cfg.operations_file = ops.clone();
    }
}
