// ABOUTME: CLI binary for the scout job-posting extractor.
// ABOUTME: Extracts job fields from URLs or saved HTML files and prints them as JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use jobtrack_scout::{Client, ClientBuilder, ExtractedRecord, ProxyEndpoint, ProxyStrategy};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(about = "Extract structured job posting data from job board URLs")]
struct Args {
    /// Job posting URLs to fetch and extract
    #[arg()]
    urls: Vec<String>,

    /// HTML file to extract from (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// URL the HTML file was saved from (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Only report whether each URL looks like a job posting (no network)
    #[arg(long = "check")]
    check: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long = "compact")]
    compact: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Per-attempt fetch timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    timeout: Option<u64>,

    /// Start all proxy attempts at once instead of one after another
    #[arg(long = "race")]
    race: bool,

    /// Proxy URL template containing {url}; repeatable, replaces the defaults
    #[arg(long = "proxy", value_name = "TEMPLATE")]
    proxies: Vec<String>,

    /// Never fall back to proxies
    #[arg(long = "no-proxy")]
    no_proxy: bool,

    /// Maximum characters kept in jobDescription
    #[arg(long = "max-description", value_name = "N")]
    max_description: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckResult<'a> {
    url: &'a str,
    likely_job_posting: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn validate_args(args: &Args) -> anyhow::Result<()> {
    if args.html.is_some() && args.url.is_none() {
        bail!("--url is required when using --html");
    }
    if args.url.is_some() && args.html.is_none() {
        bail!("--url is only valid together with --html");
    }
    if args.html.is_some() && !args.urls.is_empty() {
        bail!("cannot use both --html and positional URLs");
    }
    if args.html.is_none() && args.urls.is_empty() {
        bail!("at least one URL is required, or use --html with --url");
    }
    if args.check && args.html.is_some() {
        bail!("--check works on positional URLs only");
    }
    if args.no_proxy && !args.proxies.is_empty() {
        bail!("cannot use both --proxy and --no-proxy");
    }
    if let Some(bad) = args.proxies.iter().find(|p| !p.contains("{url}")) {
        bail!("proxy template {:?} has no {{url}} placeholder", bad);
    }
    if args.timeout == Some(0) {
        bail!("--timeout must be at least 1 second");
    }
    Ok(())
}

fn build_client(args: &Args) -> Client {
    let mut builder = ClientBuilder::new();
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(n) = args.max_description {
        builder = builder.max_description_len(n);
    }
    if args.no_proxy {
        builder = builder.proxies(Vec::new());
    } else if !args.proxies.is_empty() {
        let proxies = args
            .proxies
            .iter()
            .map(|p| ProxyEndpoint::new(p.as_str()))
            .collect();
        builder = builder.proxies(proxies);
    }
    if args.race {
        builder = builder.proxy_strategy(ProxyStrategy::Race);
    }
    builder.build()
}

/// One JSON object for a single result, an array otherwise.
fn to_json<T: Serialize>(items: &[T], compact: bool) -> anyhow::Result<String> {
    let out = match (items, compact) {
        ([one], true) => serde_json::to_string(one)?,
        ([one], false) => serde_json::to_string_pretty(one)?,
        (many, true) => serde_json::to_string(many)?,
        (many, false) => serde_json::to_string_pretty(many)?,
    };
    Ok(out)
}

fn emit(output: Option<&PathBuf>, json: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, json).with_context(|| format!("writing {:?}", path)),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

/// Runs the command, returning whether every input succeeded.
async fn run(args: &Args) -> anyhow::Result<bool> {
    validate_args(args)?;

    let client = build_client(args);

    if args.check {
        let verdicts: Vec<CheckResult> = args
            .urls
            .iter()
            .map(|url| CheckResult {
                url,
                likely_job_posting: client.is_likely_job_posting(url),
            })
            .collect();
        emit(args.output.as_ref(), &to_json(&verdicts, args.compact)?)?;
        return Ok(true);
    }

    let mut records: Vec<ExtractedRecord> = Vec::new();
    let mut ok = true;

    if let (Some(path), Some(url)) = (&args.html, &args.url) {
        let html = match fs::read_to_string(path) {
            Ok(html) => Some(html),
            Err(e) => {
                eprintln!("error reading file {:?}: {}", path, e);
                ok = false;
                None
            }
        };
        if let Some(html) = html {
            match client.extract_html(&html, url) {
                Ok(record) => records.push(record),
                Err(e) => {
                    eprintln!("error: {}", e);
                    ok = false;
                }
            }
        }
    } else {
        for result in client.extract_all(&args.urls).await {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    eprintln!("error: {}", e);
                    ok = false;
                }
            }
        }
    }

    if !records.is_empty() {
        emit(args.output.as_ref(), &to_json(&records, args.compact)?)?;
    }
    Ok(ok)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let start = Instant::now();
    let outcome = run(&args).await;

    if args.timing {
        eprintln!("elapsed: {}ms", start.elapsed().as_millis());
    }

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
