use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use tammeni_encoding::HashEmbedder;
use tammeni_pipeline::{
    MemoryResponseStore, ScreeningPipeline, ScreeningPipelineBuilder, ScreeningTelemetry,
    Submission,
};
use tammeni_scoring::LogisticModel;

#[derive(Parser, Debug)]
#[command(name = "tammeni", version, about = "Arabic mental-health questionnaire screening")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the deployed questionnaire.
    Questions,
    /// Screens one submission and prints the diagnosis as JSON.
    Screen(ScreenArgs),
}

#[derive(Parser, Debug)]
struct ScreenArgs {
    /// Submission JSON: username, gender, age_bracket, answers.
    #[arg(long)]
    input: PathBuf,
    /// Exported depression model (JSON weights and bias).
    #[arg(long)]
    dep_model: PathBuf,
    /// Exported anxiety model (JSON weights and bias).
    #[arg(long)]
    anx_model: PathBuf,
    /// Embedding dimension of the offline hash embedder.
    #[arg(long, default_value_t = 256)]
    dim: usize,
    /// Structured JSONL log path.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Questions => {
            let pipeline_questions = tammeni_pipeline::QuestionSet::deployed();
            for (index, question) in pipeline_questions.questions().iter().enumerate() {
                println!("{}. {question}", index + 1);
            }
            Ok(())
        }
        Commands::Screen(args) => handle_screen(&args),
    }
}

fn handle_screen(args: &ScreenArgs) -> Result<()> {
    let submission: Submission = serde_json::from_str(
        &fs::read_to_string(&args.input)
            .with_context(|| format!("reading submission {:?}", args.input))?,
    )
    .context("parsing submission JSON")?;

    let pipeline = build_pipeline(args)?;
    let store = MemoryResponseStore::new();

    let runtime = Runtime::new()?;
    let (_, result) = runtime.block_on(pipeline.screen_and_store(&store, &submission))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn build_pipeline(args: &ScreenArgs) -> Result<ScreeningPipeline> {
    let depression = load_model(&args.dep_model)?;
    let anxiety = load_model(&args.anx_model)?;
    let mut builder = ScreeningPipelineBuilder::new(
        Arc::new(HashEmbedder::new(args.dim)),
        Arc::new(depression),
        Arc::new(anxiety),
    );
    if let Some(path) = &args.log {
        builder = builder.telemetry(ScreeningTelemetry::open(path)?);
    }
    Ok(builder.build()?)
}

fn load_model(path: &Path) -> Result<LogisticModel> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading model {path:?}"))?;
    Ok(LogisticModel::from_json(&raw)?)
}
