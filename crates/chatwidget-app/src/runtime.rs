//! Mounted widget: event-driven rendering plus the stdin command loop.

use std::io::{self, Write};
use std::sync::Arc;

use chatwidget_common::{Event, EventBus, Result, WidgetError};
use chatwidget_config::WidgetConfig;
use chatwidget_session::{ChatSession, HttpApiConfig, HttpChatApi, SessionConfig};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinSet;

use crate::input::{self, Command};
use crate::panel::WidgetPanel;
use crate::render::{self, Viewport};

/// A mounted widget and the pieces the input loop needs.
pub struct Widget {
    session: Arc<ChatSession>,
    api: Arc<HttpChatApi>,
    panel: Arc<Mutex<WidgetPanel>>,
    events: Arc<EventBus>,
}

impl Widget {
    /// Build the client and session and seed the panel. No network traffic.
    pub fn mount(config: &WidgetConfig) -> Result<(Self, broadcast::Receiver<Event>)> {
        let api = HttpChatApi::new(HttpApiConfig::from_api_config(&config.api))
            .map_err(|e| WidgetError::Api(e.to_string()))?;
        tracing::debug!(
            base_url = %api.config().base_url,
            request_timeout = ?api.config().request_timeout,
            "chat client ready"
        );
        let api = Arc::new(api);

        let events = Arc::new(EventBus::new(config.events.capacity as usize));
        // Subscribe before initializing so the welcome message is seen.
        let rx = events.subscribe();
        let session = ChatSession::initialize(
            SessionConfig::from_widget_config(config),
            api.clone(),
            events.clone(),
        )?;

        let widget = Self {
            session: Arc::new(session),
            api,
            panel: Arc::new(Mutex::new(WidgetPanel::new(config))),
            events,
        };
        Ok((widget, rx))
    }

    /// Run until `/quit` or end of input.
    pub async fn run(self, rx: broadcast::Receiver<Event>) -> Result<()> {
        let render_task = tokio::spawn(render_loop(
            rx,
            self.panel.clone(),
            self.session.clone(),
        ));

        let mut sends = JoinSet::new();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut quit = false;

        while let Some(line) = lines.next_line().await? {
            match input::parse(&line) {
                Command::Send(text) => {
                    let session = self.session.clone();
                    sends.spawn(async move { session.send_message(&text).await });
                }
                Command::Toggle => {
                    self.session.toggle_visibility();
                }
                Command::History => self.show_history().await?,
                Command::ScrollUp(n) => {
                    self.panel.lock().await.scroll_up(n);
                    self.redraw().await?;
                }
                Command::ScrollDown(n) => {
                    self.panel.lock().await.scroll_down(n);
                    self.redraw().await?;
                }
                Command::Help => println!("{}", input::HELP),
                Command::Unknown(cmd) => println!("unknown command {cmd}, try /help"),
                Command::Quit => {
                    quit = true;
                    break;
                }
            }

            // Reap finished sends so the set stays small.
            while let Some(result) = sends.try_join_next() {
                if let Err(e) = result {
                    tracing::warn!("send task failed: {e}");
                }
            }
        }

        if quit {
            sends.abort_all();
        } else {
            // End of input: let in-flight exchanges land first.
            while let Some(result) = sends.join_next().await {
                if let Err(e) = result {
                    tracing::warn!("send task failed: {e}");
                }
            }
        }

        self.events.publish(Event::Shutdown);
        if let Err(e) = render_task.await {
            tracing::warn!("render task failed: {e}");
        }
        tracing::info!(widget_id = %self.session.widget_id(), "widget unmounted");
        Ok(())
    }

    async fn redraw(&self) -> io::Result<()> {
        let panel = self.panel.lock().await;
        draw(&panel)
    }

    async fn show_history(&self) -> Result<()> {
        let Some(id) = self.session.conversation_id() else {
            println!("no conversation yet");
            return Ok(());
        };

        match self.api.get_conversation(id).await {
            Ok(record) => {
                let mut out = io::stdout().lock();
                writeln!(out, "conversation {} ({} messages)", record.id, record.messages.len())?;
                for message in &record.messages {
                    let when = message.timestamp.as_deref().unwrap_or("-");
                    writeln!(out, "  [{when}] {}: {}", message.role, message.content)?;
                }
                out.flush()?;
            }
            Err(e) => {
                tracing::warn!(conversation_id = %id, "history unavailable: {e}");
                println!("history unavailable: {e}");
            }
        }
        Ok(())
    }
}

/// Mirror session events into the panel and redraw on change.
async fn render_loop(
    mut rx: broadcast::Receiver<Event>,
    panel: Arc<Mutex<WidgetPanel>>,
    session: Arc<ChatSession>,
) {
    loop {
        let changed = match rx.recv().await {
            Ok(Event::Shutdown) | Err(broadcast::error::RecvError::Closed) => break,
            Ok(event) => panel.lock().await.apply(&event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "render loop lagged, resyncing transcript");
                let messages = session.messages().await;
                panel.lock().await.sync(messages);
                true
            }
        };

        if changed {
            let panel = panel.lock().await;
            if let Err(e) = draw(&panel) {
                tracing::warn!("failed to draw widget: {e}");
            }
        }
    }
}

fn draw(panel: &WidgetPanel) -> io::Result<()> {
    let mut out = io::stdout().lock();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    render::render(&mut out, panel, Viewport::current())
}
