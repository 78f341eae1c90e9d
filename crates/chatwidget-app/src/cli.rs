use clap::Parser;

/// chatwidget: a terminal host for the LocalVoiceAI support chat widget.
#[derive(Parser, Debug, Default)]
#[command(name = "chatwidget", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Tenant whose chat agent answers.
    #[arg(long, env = "CHATWIDGET_TENANT_ID")]
    pub tenant_id: Option<String>,

    /// Backend base URL, including the API prefix.
    #[arg(long, env = "CHATWIDGET_API_URL")]
    pub api_url: Option<String>,

    /// Dock side (left or right).
    #[arg(long)]
    pub position: Option<String>,

    /// Theme color for the header, e.g. "#2e294e".
    #[arg(long)]
    pub theme_color: Option<String>,

    /// Host cookie string, e.g. "customer_id=abc; theme=dark".
    #[arg(long, env = "CHATWIDGET_COOKIES")]
    pub cookies: Option<String>,

    /// Tenant API key; pulls dashboard settings from the backend.
    #[arg(long, env = "CHATWIDGET_WIDGET_KEY")]
    pub widget_key: Option<String>,

    /// Host embed object as JSON: {"tenantId": ..., "position": ..., "themeColor": ...}.
    #[arg(long, env = "CHATWIDGET_EMBED")]
    pub embed: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
