mod cli;
mod input;
mod panel;
mod render;
mod runtime;
mod settings;

use chatwidget_config::WidgetConfig;
use tracing_subscriber::EnvFilter;

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root, two levels up from crates/chatwidget-app/
        manifest_dir.join("..").join("..").join(".env"),
        std::path::PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

/// Logs go to stderr so they never interleave with the drawn widget.
fn init_logging(directive: &str) {
    let directive = directive
        .parse()
        .unwrap_or_else(|_| "info".parse().unwrap());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn main() {
    // Load .env before any thread exists and before clap reads CHATWIDGET_*
    load_dotenv();

    let args = cli::parse();

    // The file decides the default log level, so read it before logging starts
    let file = settings::load_file(&args);
    let level = match (&args.log_level, &file) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.as_directive().to_string(),
        (None, Err(_)) => "info".to_string(),
    };
    init_logging(&level);

    tracing::info!("chatwidget v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match file {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load config: {e}");
            return;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            return;
        }
    };
    runtime.block_on(run(config, &args));
    tracing::info!("shutdown complete");
}

async fn run(config: WidgetConfig, args: &cli::Args) {
    let config = match settings::resolve(config, args).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("cannot mount widget: {e}");
            return;
        }
    };
    tracing::info!(
        tenant_id = %config.widget.tenant_id,
        api = %config.api.base_url,
        "config resolved"
    );

    let (widget, rx) = match runtime::Widget::mount(&config) {
        Ok(mounted) => mounted,
        Err(e) => {
            tracing::error!("cannot mount widget: {e}");
            return;
        }
    };

    if let Err(e) = widget.run(rx).await {
        tracing::error!("widget stopped: {e}");
    }
}
