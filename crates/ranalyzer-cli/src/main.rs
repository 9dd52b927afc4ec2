mod analyze;
mod render;
mod watch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ranalyzer_client::AnalyzerClient;
use ranalyzer_core::AnalysisRequest;

#[derive(Debug, Parser)]
#[command(name = "ranalyzer")]
#[command(about = "Resume analyzer command line client")]
struct Cli {
    /// Backend base URL (overrides RANALYZER_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Per-request timeout in seconds (overrides RANALYZER_REQUEST_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check once whether the backend is reachable
    Health,
    /// Poll backend health until interrupted; press Enter to retry immediately
    Watch {
        /// Seconds between probes (defaults to RANALYZER_HEALTH_POLL_SECS)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    /// Score a resume for ATS compatibility
    Ats {
        #[command(flatten)]
        resume: ResumeArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Match a resume against one job description
    Match {
        #[command(flatten)]
        resume: ResumeArgs,
        /// Job description text
        #[arg(long, conflicts_with = "jd_file")]
        jd: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        jd_file: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Compare a resume against several job descriptions
    Compare {
        #[command(flatten)]
        resume: ResumeArgs,
        /// Job description files, in the order results should be reported
        #[arg(long = "jd-file", num_args = 1.., required = true)]
        jd_files: Vec<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Where the resume comes from. At most one source may be given.
#[derive(Debug, Args, PartialEq, Eq)]
#[group(multiple = false)]
struct ResumeArgs {
    /// Resume text
    #[arg(long)]
    text: Option<String>,
    /// Read resume text from a plain-text file
    #[arg(long)]
    text_file: Option<PathBuf>,
    /// Upload a resume document (.pdf, .docx, .doc)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Debug, Args, PartialEq, Eq)]
struct OutputArgs {
    /// Print the raw result payload as JSON instead of the formatted view
    #[arg(long)]
    json: bool,
    /// Save the result payload as JSON; without a path, a timestamped name is used
    #[arg(long)]
    export: Option<Option<PathBuf>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ranalyzer_core::load_app_config_from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.api_base_url.clone_from(base_url);
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.request_timeout_secs = timeout_secs;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = AnalyzerClient::new(&config)?;

    match cli.command {
        Some(Commands::Health) => watch::run_health(&client).await?,
        Some(Commands::Watch { interval_secs }) => {
            if let Some(secs) = interval_secs {
                anyhow::ensure!(secs > 0, "--interval-secs must be greater than zero");
                config.health_poll_secs = secs;
            }
            watch::run_watch(client, &config).await?;
        }
        Some(Commands::Ats { resume, output }) => {
            let request = AnalysisRequest::Ats {
                candidate: analyze::load_candidate(&resume)?,
            };
            analyze::run(client, &config, &request, &output, &[]).await?;
        }
        Some(Commands::Match {
            resume,
            jd,
            jd_file,
            output,
        }) => {
            let jd_text = analyze::load_jd(jd, jd_file.as_deref())?;
            let request = AnalysisRequest::JdMatch {
                candidate: analyze::load_candidate_for_match(&resume, jd_text.as_deref())?,
                jd_text: jd_text.unwrap_or_default(),
            };
            analyze::run(client, &config, &request, &output, &[]).await?;
        }
        Some(Commands::Compare {
            resume,
            jd_files,
            output,
        }) => {
            let request = AnalysisRequest::CompareJds {
                candidate: analyze::load_candidate(&resume)?,
                jd_texts: analyze::load_jd_files(&jd_files)?,
            };
            let labels = analyze::jd_labels(&jd_files);
            analyze::run(client, &config, &request, &output, &labels).await?;
        }
        None => println!("ranalyzer ready; run `ranalyzer --help` for commands"),
    }

    Ok(())
}
