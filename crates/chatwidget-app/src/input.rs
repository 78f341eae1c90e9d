//! Input line parsing for the widget loop.
//!
//! Lines starting with `/` are commands; everything else is a message
//! for the session. Blank lines are still passed through as messages so
//! the session decides what to ignore.

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Open or close the panel.
    Toggle,
    /// Fetch the server-side copy of the conversation.
    History,
    /// Scroll the transcript back (`/up [n]`) or forward (`/down [n]`).
    ScrollUp(usize),
    ScrollDown(usize),
    Quit,
    Help,
    Send(String),
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return Command::Send(line.to_string());
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match cmd.as_str() {
        "/toggle" | "/t" => Command::Toggle,
        "/history" => Command::History,
        "/up" => Command::ScrollUp(arg.parse().unwrap_or(1)),
        "/down" => Command::ScrollDown(arg.parse().unwrap_or(1)),
        "/quit" | "/exit" | "/q" => Command::Quit,
        "/help" | "/h" | "/?" => Command::Help,
        other => Command::Unknown(other.to_string()),
    }
}

pub const HELP: &str = "\
/toggle       open or close the widget
/history      show the conversation as stored by the server
/up [n]       scroll back n messages
/down [n]     scroll forward n messages
/quit         exit
anything else is sent to the assistant";
