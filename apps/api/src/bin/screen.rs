//! Command-line front end: uploads a resume to a running screener server,
//! analyzes it against a job description and prints the report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::client::flow::{run_screening, FlowState, ScreeningFlow};
use screener::client::http::HttpScreeningClient;
use screener::client::report::render_report;
use screener::client::ResumeFile;

#[derive(Parser, Debug)]
#[command(name = "screen", version, about = "Screen a resume against a job description")]
#[command(group(ArgGroup::new("jd").required(true).args(["job", "job_file"])))]
struct Args {
    /// Base URL of the screener server
    #[arg(long, default_value = "http://localhost:8080")]
    server: String,

    /// Resume file (PDF or DOCX)
    #[arg(long)]
    resume: PathBuf,

    /// Job description text
    #[arg(long)]
    job: Option<String>,

    /// File containing the job description
    #[arg(long)]
    job_file: Option<PathBuf>,

    /// Also print the extracted resume text
    #[arg(long)]
    show_text: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let job_description = match (&args.job, &args.job_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading job description from {}", path.display()))?,
        (None, None) => anyhow::bail!("either --job or --job-file is required"),
    };

    let file = ResumeFile::from_path(&args.resume)
        .await
        .with_context(|| format!("reading resume from {}", args.resume.display()))?;

    let backend = HttpScreeningClient::new(&args.server)?;
    let mut flow = ScreeningFlow::new();

    let result = run_screening(&backend, &mut flow, &file, &job_description, |state| {
        match state {
            FlowState::Parsing => eprintln!("Extracting text from {}...", file.file_name),
            FlowState::Analyzing { .. } => eprintln!("Evaluating with AI..."),
            FlowState::Failed { message, .. } => eprintln!("Failed: {message}"),
            FlowState::Idle | FlowState::Done { .. } => {}
        }
    })
    .await?;

    if args.show_text {
        if let FlowState::Done { resume_text, .. } = flow.state() {
            println!("Parsed resume text:\n{resume_text}\n");
        }
    }
    print!("{}", render_report(&result));

    Ok(())
}
