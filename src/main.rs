use std::process;

use schema_batch::batch::{run_batch, validate_one};
use schema_batch::cli::Cli;
use schema_batch::config::{Job, Target};
use schema_batch::error::Result;
use schema_batch::schema::load_schema;

const EXIT_INVALID: i32 = 1;
const EXIT_FATAL: i32 = 2;

fn main() {
    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    let config = match cli.to_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(EXIT_FATAL);
        }
    };

    let targets = match config.validate() {
        Ok(targets) => targets,
        Err(e) => {
            eprintln!("Invalid config: {}", e);
            process::exit(EXIT_FATAL);
        }
    };

    if cli.validate_config {
        if let Some(path) = &cli.config {
            println!("Config valid: {}", path.display());
        }
        process::exit(0);
    }

    tracing::info!("Running {} job(s)", config.jobs.len());

    let mut should_fail = false;
    for (idx, (job, target)) in config.jobs.iter().zip(targets).enumerate() {
        match run_job(job, target) {
            Ok(failed) => {
                if failed > 0 && config.effective_fail_on_invalid(job) {
                    should_fail = true;
                }
            }
            Err(e) => {
                eprintln!("Job {} failed: {}", idx, e);
                process::exit(EXIT_FATAL);
            }
        }
    }

    if should_fail {
        process::exit(EXIT_INVALID);
    }
}

/// Run one job, print its report and return how many documents failed.
fn run_job(job: &Job, target: Target<'_>) -> Result<usize> {
    match target {
        Target::Dir(dir) => {
            tracing::info!(
                dir = %dir.display(),
                schema = %job.schema.display(),
                "Validating directory"
            );
            let schema = load_schema(&job.schema)?;
            let report = run_batch(dir, &schema)?;
            print!("{}", report);
            tracing::info!(
                dir = %dir.display(),
                checked = report.checked,
                failed = report.failed(),
                "Directory validated"
            );
            Ok(report.failed())
        }
        Target::File(file) => {
            tracing::info!(
                file = %file.display(),
                schema = %job.schema.display(),
                "Validating document"
            );
            let error_text = validate_one(file, &job.schema)?;
            if error_text.is_empty() {
                return Ok(0);
            }
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            println!("{}: {}", name, error_text);
            Ok(1)
        }
    }
}
