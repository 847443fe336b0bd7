use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use wordlist_lemmas::{LemmaTable, LoadMode};

use wordlister::{AppState, Wordlist, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_LEMMA_PATH: &str = "data/lemmatization-en.txt";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!(
        "using lemma table at {} (mode: {:?})",
        config.lemma_path.display(),
        config.lemma_mode
    );

    let start = Instant::now();
    let lemmas = LemmaTable::load_with_mode(&config.lemma_path, config.lemma_mode)?;
    info!(
        "lemma table loaded: {} entries in {} ms",
        lemmas.len(),
        start.elapsed().as_millis()
    );

    let wordlist = Arc::new(Wordlist::new(lemmas));
    let state = AppState { wordlist };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid listen address");
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    lemma_path: PathBuf,
    lemma_mode: LoadMode,
}

fn load_config() -> Config {
    let mut cli_lemma_path: Option<PathBuf> = None;
    let mut cli_lemma_mode: Option<LoadMode> = None;
    let mut args = env::args().skip(1).peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lemma-file" => {
                if let Some(path) = args.next() {
                    cli_lemma_path = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--lemma-file=") {
                    cli_lemma_path = Some(PathBuf::from(path));
                } else if let Some(mode) = arg.strip_prefix("--lemma-mode=") {
                    cli_lemma_mode = parse_load_mode(mode);
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let lemma_path = cli_lemma_path
        .or_else(|| env::var("LEMMA_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEMMA_PATH));
    let lemma_mode = cli_lemma_mode
        .or_else(|| {
            env::var("LEMMA_LOAD_MODE")
                .ok()
                .as_deref()
                .and_then(parse_load_mode)
        })
        .unwrap_or(LoadMode::Mmap);

    Config {
        host,
        port,
        lemma_path,
        lemma_mode,
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
