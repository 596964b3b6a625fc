use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sinkhole::acl::{AccessControlLists, HttpFetcher, Loader};
use sinkhole::cache::SortedStringSet;
use sinkhole::pool::{DEFAULT_PRIMARY, DEFAULT_SECONDARY, UpstreamPool};
use sinkhole::resolver::{QueryAction, Resolver};

#[derive(Parser)]
#[command(name = "sinkhole")]
#[command(
    about = "Blacklist loader and upstream selector for a DNS filtering proxy",
    long_about = None
)]
struct Args {
    /// JSON file listing sources, blacklist and whitelist
    #[arg(short, long, env = "SINKHOLE_CONFIG")]
    config: Option<PathBuf>,

    /// Primary upstream resolver (empty to disable)
    #[arg(long, env = "SINKHOLE_DNS1", default_value = DEFAULT_PRIMARY)]
    dns1: String,

    /// Secondary upstream resolver (empty to disable)
    #[arg(long, env = "SINKHOLE_DNS2", default_value = DEFAULT_SECONDARY)]
    dns2: String,

    /// Per-source fetch timeout in seconds
    #[arg(long, default_value = "30")]
    fetch_timeout: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Domains to check against the loaded blacklist
    domains: Vec<String>,
}

fn setup_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

async fn run(args: Args) -> sinkhole::Result<()> {
    let lists = AccessControlLists::resolve(args.config.as_deref())?;
    let upstreams = UpstreamPool::from_pair(&args.dns1, &args.dns2)?;

    let cache = Arc::new(SortedStringSet::new());
    let loader = Loader::new(Arc::new(HttpFetcher::new()?))
        .with_timeout(Duration::from_secs(args.fetch_timeout));
    let report = loader.load(&lists, &cache).await;

    let resolver = Resolver::new(cache, upstreams);
    info!(
        domains = report.domains,
        upstreams = resolver.upstreams().addresses().len(),
        "blacklist ready"
    );

    for domain in &args.domains {
        match resolver.process_query(domain) {
            QueryAction::Blocked { domain } => println!("{domain} BLOCKED"),
            QueryAction::Forward { domain, upstream } => {
                println!("{domain} FORWARDED (to {upstream})")
            }
        }
    }

    Ok(())
}

fn start(args: Args) -> sinkhole::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| sinkhole::Error::Runtime { source })?;

    rt.block_on(run(args))
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log_level);

    match start(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
