//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Chat widget configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[widget]
# Tenant key issued by the dashboard. Required; may also come from
# --tenant-id, CHATWIDGET_TENANT_ID or the embed object.
tenant_id = ""
# position = "right"            # left, right
# theme_color = "#2e294e"       # #RGB, #RRGGBB, #RRGGBBAA, rgb(), rgba()
# title = "LocalVoiceAI"
# welcome_message = "Hello! How can I help you today?"

[api]
# base_url = "http://localhost:8000/api/v1"
# connect_timeout = 10          # seconds, 1-60
# request_timeout = 120         # seconds, 1-600
# widget_key = ""               # tenant API key; pulls settings from /widget/config

[customer]
# cookie_name = "customer_id"
# cookies = ""                  # e.g. "customer_id=abc123; theme=dark"

[events]
# capacity = 256                # 16-4096

[logging]
# level = "info"                # debug, info, warn, error
"##
    .to_string()
}
