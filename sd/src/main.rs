//! specdriver - CLI entry point
//!
//! Thin presentation layer over the library: reads questionnaire answers,
//! runs the validation gate, drives the generation engine, and prints or
//! writes the accumulated document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result, bail};
use tokio::sync::mpsc;
use tracing::info;

use specdriver::cli::{Cli, Command};
use specdriver::config::Config;
use specdriver::engine::{GenerationEngine, RunEvent, RunOutcome};
use specdriver::form::{FieldEntry, FormDefinition, serialize_entries, validate};
use specdriver::navigate::NavigationClient;
use specdriver::{GenerationBackend, HealthState, HttpBackend};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("specdriver")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("specdriver.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "specdriver loaded config: backend={}, timeout-ms={}",
        config.backend.base_url, config.backend.timeout_ms
    );

    match cli.command {
        Command::Generate { answers, output } => cmd_generate(&config, &answers, output.as_deref()).await,
        Command::Ask { query, project } => cmd_ask(&config, &query, &project).await,
        Command::Upload { file, project } => cmd_upload(&config, &file, &project).await,
        Command::Projects => cmd_projects(&config).await,
        Command::Health => cmd_health(&config).await,
    }
}

/// Read a flat answers file: dot-path keys mapped to scalar values
fn load_answers(path: &Path) -> Result<Vec<FieldEntry>> {
    let content = fs::read_to_string(path).context(format!("Failed to read answers file {}", path.display()))?;
    let value: serde_yaml::Value = serde_yaml::from_str(&content).context("Failed to parse answers file")?;

    let serde_yaml::Value::Mapping(mapping) = value else {
        bail!("Answers file must be a flat mapping of dot-path keys to values");
    };

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let serde_yaml::Value::String(path) = key else {
            bail!("Answers file keys must be strings");
        };
        let value = match value {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Null => String::new(),
            other => bail!("Answer for '{}' must be a scalar, got: {:?}", path, other),
        };
        entries.push(FieldEntry::new(path, value));
    }

    Ok(entries)
}

/// Run the full pipeline: validate, serialize, generate, print
async fn cmd_generate(config: &Config, answers_path: &Path, output: Option<&Path>) -> Result<()> {
    let entries = load_answers(answers_path)?;

    // Validation gate - nothing goes over the wire until this is clean
    let form = FormDefinition::standard();
    let report = validate(&form, &entries);
    if !report.is_valid() {
        eprintln!("Please fill in all required fields before generating:");
        for field in &report.invalid_fields {
            eprintln!("  - {}", field);
        }
        eprintln!();
        eprintln!("Check these form sections:");
        for section in &report.expand_sections {
            eprintln!("  - {}", section);
        }
        std::process::exit(1);
    }

    let questionnaire = serialize_entries(&entries).map_err(|e| eyre::eyre!(e.to_string()))?;
    let plan = config.generation.plan().map_err(|e| eyre::eyre!(e.to_string()))?;
    let backend: Arc<dyn GenerationBackend> =
        Arc::new(HttpBackend::from_config(&config.backend).context("Failed to create backend client")?);

    let mut engine = GenerationEngine::new(backend, plan, config.generation.placeholder_marker.clone());

    // Progress goes to stderr so stdout stays the document
    let (tx, mut rx) = mpsc::channel(64);
    engine.set_event_sink(tx);
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                RunEvent::Status(status) => eprintln!("{}", status),
                RunEvent::Progress(progress) => eprintln!("  {}%", progress),
                RunEvent::Finished(_) => break,
            }
        }
    });

    let outcome = engine.run(&questionnaire).await;
    let _ = printer.await;

    match outcome {
        RunOutcome::Completed => {}
        RunOutcome::PartialStop => {
            eprintln!("⚠ Generation stopped early; the document ends with an unparsed fragment.");
        }
        RunOutcome::Failed => {
            eprintln!("✗ Generation failed: {}", engine.state().error_message);
            std::process::exit(1);
        }
        RunOutcome::Cancelled => {
            eprintln!("⚠ Generation cancelled");
            std::process::exit(1);
        }
    }

    let rendered = engine.document().render();
    match output {
        Some(path) => {
            fs::write(path, &rendered).context(format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} sections to {}", engine.document().len(), path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Single-shot navigation question
async fn cmd_ask(config: &Config, query: &str, project: &str) -> Result<()> {
    if project.trim().is_empty() {
        bail!("Project identifier must not be empty");
    }

    let backend: Arc<dyn GenerationBackend> =
        Arc::new(HttpBackend::from_config(&config.backend).context("Failed to create backend client")?);
    let client = NavigationClient::new(backend);

    match client.ask(query, project).await {
        Some(answer) => println!("{}", answer),
        None => eprintln!("Query is empty; nothing to ask."),
    }

    Ok(())
}

/// Upload a .docx project document
async fn cmd_upload(config: &Config, file: &Path, project: &str) -> Result<()> {
    if project.trim().is_empty() {
        bail!("Project identifier must not be empty");
    }

    let backend = HttpBackend::from_config(&config.backend).context("Failed to create backend client")?;
    backend
        .upload_document(project, file)
        .await
        .context("Upload failed")?;

    println!("✓ Uploaded {} to project '{}'", file.display(), project);
    Ok(())
}

/// List known projects
async fn cmd_projects(config: &Config) -> Result<()> {
    let backend = HttpBackend::from_config(&config.backend).context("Failed to create backend client")?;
    let projects = backend.list_projects().await.context("Failed to list projects")?;

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    for project in projects {
        println!("{}", project);
    }
    Ok(())
}

/// Probe the AI health endpoint
async fn cmd_health(config: &Config) -> Result<()> {
    let backend = HttpBackend::from_config(&config.backend).context("Failed to create backend client")?;
    let state = HealthState::from_probe(&backend.health().await);
    println!("AI backend: {}", state);
    Ok(())
}
