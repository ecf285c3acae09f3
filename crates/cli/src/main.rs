//! Jobgate CLI - submit jobs to a running Jobgate daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Deserialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "jobgate-cli")]
#[command(about = "Jobgate CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Daemon base URL
    #[arg(long, env = "JOBGATE_URL", default_value = DEFAULT_URL)]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one or more jobs, in order
    Submit {
        /// Job descriptors
        #[arg(required = true)]
        jobs: Vec<String>,

        /// HTTP method used for each submission
        #[arg(short, long, value_enum, default_value = "post")]
        method: SubmitMethod,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SubmitMethod {
    Get,
    Post,
}

#[derive(Deserialize)]
struct EnqueueResponse {
    queue_depth: usize,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// How the daemon answered one submission
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Accepted,
    Busy,
    Unavailable,
    Rejected(u16),
}

impl Outcome {
    fn from_status(status: u16) -> Self {
        match status {
            200 | 202 => Outcome::Accepted,
            429 => Outcome::Busy,
            503 => Outcome::Unavailable,
            other => Outcome::Rejected(other),
        }
    }

    fn label(&self) -> String {
        match self {
            Outcome::Accepted => "ACCEPTED".green().to_string(),
            Outcome::Busy => "BUSY (retry later)".yellow().to_string(),
            Outcome::Unavailable => "UNAVAILABLE".red().to_string(),
            Outcome::Rejected(status) => format!("REJECTED ({})", status).red().to_string(),
        }
    }
}

#[derive(Tabled)]
struct SubmissionRow {
    job: String,
    outcome: String,
    queue_depth: String,
    detail: String,
}

async fn submit(
    client: &reqwest::Client,
    url: &str,
    method: SubmitMethod,
    job: &str,
) -> Result<(Outcome, SubmissionRow)> {
    let endpoint = format!("{}/enqueue", url.trim_end_matches('/'));
    let request = match method {
        SubmitMethod::Get => client.get(&endpoint),
        SubmitMethod::Post => client.post(&endpoint),
    };

    let response = request
        .query(&[("job", job)])
        .send()
        .await
        .context("Failed to connect to daemon")?;

    let outcome = Outcome::from_status(response.status().as_u16());
    let (queue_depth, detail) = if outcome == Outcome::Accepted {
        let body: EnqueueResponse = response.json().await.context("Failed to parse response")?;
        (body.queue_depth.to_string(), String::new())
    } else {
        let detail = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => String::new(),
        };
        ("-".to_string(), detail)
    };

    let row = SubmissionRow {
        job: job.to_string(),
        outcome: outcome.label(),
        queue_depth,
        detail,
    };
    Ok((outcome, row))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Submit { jobs, method } => {
            let client = reqwest::Client::new();
            let mut rows = Vec::with_capacity(jobs.len());
            let mut all_accepted = true;

            for job in &jobs {
                let (outcome, row) = submit(&client, &cli.url, method, job).await?;
                all_accepted &= outcome == Outcome::Accepted;
                rows.push(row);
            }

            println!("{}", Table::new(rows));

            if all_accepted {
                println!("{}", format!("✓ {} job(s) accepted", jobs.len()).green().bold());
                Ok(ExitCode::SUCCESS)
            } else {
                println!("{}", "✗ Some jobs were not accepted".red().bold());
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
