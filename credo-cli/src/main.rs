//! `credo` binary: config load, tracing init, collaborator wiring, REPL.

mod repl;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use credo::{
    ArtifactClassifier, AssessmentEngine, Classifier, GroqChat, LlmClient, MockClassifier,
    MockLlm, RiskLabel,
};

#[derive(Parser, Debug)]
#[command(name = "credo", version, about = "Conversational loan default risk assessment")]
struct Args {
    /// Path to the classifier model artifact (JSON).
    #[arg(long, default_value = "loan_model.json")]
    model: PathBuf,

    /// Model id for the loan-expert fallback.
    #[arg(long, default_value = "llama-3.3-70b-versatile")]
    llm_model: String,

    /// OpenAI-compatible chat completions base URL.
    #[arg(long, default_value = credo::GROQ_API_BASE)]
    api_base: String,

    /// API key for the fallback model. Usually set via env or `.env`.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Bound for each classifier / chat-completion call, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Use mock collaborators; no artifact, network, or key needed.
    #[arg(long)]
    offline: bool,

    /// Log engine details to stderr (RUST_LOG overrides).
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "credo=debug,credo_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_engine(args: &Args) -> Result<AssessmentEngine, String> {
    let (classifier, llm): (Arc<dyn Classifier>, Arc<dyn LlmClient>) = if args.offline {
        (
            Arc::new(MockClassifier::always(RiskLabel::Low)),
            Arc::new(MockLlm::canned(
                "I'm running offline and can't answer that. Say 'yes' to run another assessment.",
            )),
        )
    } else {
        let api_key = args.api_key.clone().ok_or_else(|| {
            "GROQ_API_KEY is not set; export it, add it to .env or \
             ~/.config/credo/config.toml, or run with --offline"
                .to_string()
        })?;
        (
            Arc::new(ArtifactClassifier::new(&args.model)),
            Arc::new(GroqChat::with_base(api_key, &args.api_base, &args.llm_model)),
        )
    };
    Ok(AssessmentEngine::new(classifier, llm)
        .with_call_timeout(Duration::from_secs(args.timeout_secs)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before Args::parse so clap's env-sourced arguments see .env / XDG values.
    if let Err(e) = env_config::load_and_apply("credo", None) {
        eprintln!("warning: config load failed: {e}");
    }

    let args = Args::parse();
    init_tracing(args.verbose);

    let engine = build_engine(&args)?;
    tracing::debug!(
        model = %args.model.display(),
        llm_model = %args.llm_model,
        offline = args.offline,
        "collaborators ready"
    );

    println!("{}", credo::prompts::GREETING);
    repl::run(&engine).await
}
