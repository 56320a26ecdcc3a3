//! caseflow Legal Intake Reference Runtime — Demo CLI
//!
//! Runs the intake reference scenarios, or applies the workflow engine to
//! case snapshots stored as JSON files.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- onboarding
//!   cargo run -p demo -- escalation
//!   cargo run -p demo -- dashboard
//!   cargo run -p demo -- apply --case case.json
//!   cargo run -p demo -- stages --case case.json
//!   cargo run -p demo -- alerts --cases a.json b.json
//!
//! Every subcommand accepts `--config engine.toml` to pin the clock, set the
//! default log filter or list case files for `alerts`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use caseflow_config::EngineConfig;
use caseflow_contracts::{
    case::CaseSnapshot,
    error::{CaseflowError, CaseflowResult},
};
use caseflow_ref_intake::scenarios::{dashboard, onboarding, reminder_escalation};

// ── CLI definition ────────────────────────────────────────────────────────────

/// caseflow — case-workflow and reminder engine for legal intake.
///
/// Scenario subcommands replay the fictional reference caseload. The file
/// subcommands read case snapshots as JSON and write JSON to stdout.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "caseflow legal intake workflow engine demo",
    long_about = "Runs caseflow reference scenarios showing initial task generation,\n\
                  escalating reminders and dashboard alerts, or applies the engine\n\
                  to case snapshots loaded from JSON files."
)]
struct Cli {
    /// Engine configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three reference scenarios in sequence.
    RunAll,
    /// Scenario 1: initial tasks for a freshly accepted case.
    Onboarding,
    /// Scenario 2: reminders climbing the age buckets over repeated passes.
    Escalation,
    /// Scenario 3: caseload alerts before and after the workflow runs.
    Dashboard,
    /// Apply the workflow to one case and print the updated snapshot.
    Apply {
        /// Case snapshot JSON file.
        #[arg(long)]
        case: PathBuf,
    },
    /// Print the stage report for one case.
    Stages {
        /// Case snapshot JSON file.
        #[arg(long)]
        case: PathBuf,
    },
    /// Print dashboard alerts grouped by case.
    Alerts {
        /// Case snapshot JSON files; each holds one case or an array of cases.
        #[arg(long, num_args = 1..)]
        cases: Vec<PathBuf>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path),
        None => Ok(EngineConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::Onboarding => with_banner(onboarding::run_scenario),
        Command::Escalation => with_banner(reminder_escalation::run_scenario),
        Command::Dashboard => with_banner(dashboard::run_scenario),
        Command::Apply { case } => run_apply(&config, &case),
        Command::Stages { case } => run_stages(&config, &case),
        Command::Alerts { cases } => run_alerts(&config, &cases),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn with_banner(scenario: fn() -> CaseflowResult<()>) -> CaseflowResult<()> {
    print_banner();
    scenario()?;
    println!("All selected scenarios completed successfully.");
    Ok(())
}

fn run_all() -> CaseflowResult<()> {
    with_banner(|| {
        onboarding::run_scenario()?;
        reminder_escalation::run_scenario()?;
        dashboard::run_scenario()
    })
}

// ── File commands ─────────────────────────────────────────────────────────────

fn run_apply(config: &EngineConfig, path: &Path) -> CaseflowResult<()> {
    let case = load_single_case(path)?;
    let engine = config.engine()?;
    let run = engine.run(&case);
    info!(
        case_id = %case.id,
        created = run.created,
        current_stage = ?run.stages.current_stage,
        "applied workflow to case file"
    );
    print_json(&run.case)
}

fn run_stages(config: &EngineConfig, path: &Path) -> CaseflowResult<()> {
    let case = load_single_case(path)?;
    print_json(&config.engine()?.stage_report(&case))
}

fn run_alerts(config: &EngineConfig, paths: &[PathBuf]) -> CaseflowResult<()> {
    let mut cases = Vec::new();
    for path in config.case_files.iter().chain(paths) {
        cases.extend(load_cases(path)?);
    }
    if cases.is_empty() {
        return Err(CaseflowError::ConfigError {
            reason: "no case files given; pass --cases or set case_files in the config".to_string(),
        });
    }
    print_json(&config.engine()?.alerts_by_case(&cases))
}

// ── JSON helpers ──────────────────────────────────────────────────────────────

/// Load every case in `path`. The file holds one snapshot or an array.
fn load_cases(path: &Path) -> CaseflowResult<Vec<CaseSnapshot>> {
    let contents = std::fs::read_to_string(path).map_err(|e| CaseflowError::SnapshotParse {
        reason: format!("failed to read case file '{}': {}", path.display(), e),
    })?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| CaseflowError::SnapshotParse {
        reason: format!("'{}' is not valid JSON: {}", path.display(), e),
    })?;

    let values = match value {
        Value::Array(values) => values,
        single => vec![single],
    };
    let cases = values
        .into_iter()
        .map(|value| {
            serde_json::from_value::<CaseSnapshot>(value).map_err(|e| CaseflowError::SnapshotParse {
                reason: format!("'{}': {}", path.display(), e),
            })
        })
        .collect::<CaseflowResult<Vec<_>>>()?;

    debug!(path = %path.display(), cases = cases.len(), "loaded case file");
    Ok(cases)
}

fn load_single_case(path: &Path) -> CaseflowResult<CaseSnapshot> {
    let mut cases = load_cases(path)?;
    if cases.len() != 1 {
        return Err(CaseflowError::SnapshotParse {
            reason: format!(
                "'{}' holds {} cases; expected exactly one",
                path.display(),
                cases.len()
            ),
        });
    }
    cases.pop().ok_or_else(|| CaseflowError::SnapshotParse {
        reason: format!("'{}' holds no case", path.display()),
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> CaseflowResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| CaseflowError::SnapshotParse {
        reason: format!("failed to encode output: {}", e),
    })?;
    println!("{}", out);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("caseflow — Case Workflow and Reminder Engine");
    println!("Legal Intake Reference Demo");
    println!("============================================");
    println!();
    println!("Per case, every workflow pass:");
    println!("  [1] Stage evaluator scores the eight-stage checklist (display only)");
    println!("  [2] Initial task generator adds onboarding work not yet on file");
    println!("  [3] Reminder generator adds one task per aged, unanswered request bucket");
    println!("  [4] New tasks and one activity entry are merged into a fresh snapshot");
    println!("  [5] The case store writes it back under a per-case lock");
    println!();
}
