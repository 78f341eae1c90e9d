//! Terminal rendering for the widget panel.
//!
//! Draws a fixed-width column docked to the left or right edge of the
//! terminal: a themed header, then the transcript as bubbles. User
//! bubbles sit right in the theme color, assistant bubbles sit left.

use std::io::{self, Write};

use chatwidget_common::{ChatMessage, Color, Role};
use chatwidget_config::Position;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::panel::WidgetPanel;

/// Column width in cells.
pub const PANEL_WIDTH: usize = 44;

/// Bubbles take at most 85% of the column.
const BUBBLE_WIDTH: usize = PANEL_WIDTH * 85 / 100;

/// Rows reserved for header, status, and footer.
const CHROME_ROWS: usize = 4;

/// Terminal area the panel is drawn into.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// Current terminal size, or 80x24 if it cannot be read.
    pub fn current() -> Self {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        Self { width, height }
    }

    /// Blank cells left of the column.
    fn indent(&self, position: Position) -> usize {
        match position {
            Position::Left => 0,
            Position::Right => usize::from(self.width).saturating_sub(PANEL_WIDTH),
        }
    }
}

/// Draw the whole panel.
pub fn render<W: Write>(out: &mut W, panel: &WidgetPanel, viewport: Viewport) -> io::Result<()> {
    let indent = " ".repeat(viewport.indent(panel.position()));

    render_header(out, panel, &indent)?;
    if !panel.is_open() {
        return out.flush();
    }

    let mut rows = usize::from(viewport.height).saturating_sub(CHROME_ROWS);
    let mut blocks: Vec<Vec<String>> = Vec::new();
    for message in panel.visible_messages(usize::MAX).iter().rev() {
        let block = bubble_lines(message);
        // Each bubble also takes a label row.
        if block.len() + 1 > rows {
            break;
        }
        rows -= block.len() + 1;
        blocks.push(block);
    }

    let visible = panel.visible_messages(blocks.len());
    for (message, lines) in visible.iter().zip(blocks.into_iter().rev()) {
        render_bubble(out, message, &lines, &indent, panel.theme())?;
    }

    if let Some(status) = panel.status() {
        queue!(
            out,
            Print(&indent),
            SetAttribute(Attribute::Dim),
            Print(truncate(&format!("! {status}"), PANEL_WIDTH)),
            SetAttribute(Attribute::Reset),
            Print("\n"),
        )?;
    }

    queue!(
        out,
        Print(&indent),
        SetAttribute(Attribute::Dim),
        Print("/toggle  /history  /quit"),
        SetAttribute(Attribute::Reset),
        Print("\n"),
    )?;
    out.flush()
}

fn render_header<W: Write>(out: &mut W, panel: &WidgetPanel, indent: &str) -> io::Result<()> {
    let marker = if panel.is_open() { "[-]" } else { "[+]" };
    let title_width = PANEL_WIDTH - marker.len() - 2;
    let text = format!(
        " {}{marker} ",
        pad(&truncate(panel.title(), title_width), title_width)
    );

    let theme = panel.theme();
    queue!(
        out,
        Print(indent),
        SetBackgroundColor(term_color(theme)),
        SetForegroundColor(contrast(theme)),
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("\n"),
    )
}

fn render_bubble<W: Write>(
    out: &mut W,
    message: &ChatMessage,
    lines: &[String],
    indent: &str,
    theme: Color,
) -> io::Result<()> {
    let (bg, fg) = match message.role {
        Role::User => (term_color(theme), contrast(theme)),
        Role::Assistant => (TermColor::White, TermColor::Rgb { r: 26, g: 26, b: 26 }),
    };

    for line in lines {
        let cell = format!(" {} ", pad(line, BUBBLE_WIDTH));
        queue!(
            out,
            Print(indent),
            Print(lead(message.role, cell.width())),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(cell),
            ResetColor,
            Print("\n"),
        )?;
    }

    let label = message.role.label();
    queue!(
        out,
        Print(indent),
        Print(lead(message.role, label.width() + 1)),
        SetAttribute(Attribute::Dim),
        Print(label),
        SetAttribute(Attribute::Reset),
        Print("\n"),
    )
}

/// Padding that pushes user content to the right edge of the column.
fn lead(role: Role, content_width: usize) -> String {
    match role {
        Role::User => " ".repeat(PANEL_WIDTH.saturating_sub(content_width)),
        Role::Assistant => " ".to_string(),
    }
}

/// Wrapped bubble text for one message.
fn bubble_lines(message: &ChatMessage) -> Vec<String> {
    wrap(&message.content, BUBBLE_WIDTH)
}

/// Greedy word wrap by terminal cells. Words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut cells = 0;
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.width() > width {
                if cells > 0 {
                    lines.push(std::mem::take(&mut line));
                    cells = 0;
                }
                let (head, tail) = split_at_cells(&word, width);
                lines.push(head.to_string());
                word = tail.to_string();
            }
            let word_cells = word.width();
            if cells > 0 && cells + 1 + word_cells > width {
                lines.push(std::mem::take(&mut line));
                cells = 0;
            }
            if cells > 0 {
                line.push(' ');
                cells += 1;
            }
            cells += word_cells;
            line.push_str(&word);
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split so the head fills at most `width` cells. The head always takes
/// at least one character.
fn split_at_cells(text: &str, width: usize) -> (&str, &str) {
    let mut cells = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if cells + w > width && i > 0 {
            return text.split_at(i);
        }
        cells += w;
    }
    (text, "")
}

/// Right-pad with spaces to `width` cells.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let (head, _) = split_at_cells(text, width.saturating_sub(1));
    format!("{head}~")
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Readable text color on top of `background`.
fn contrast(background: Color) -> TermColor {
    if background.is_dark() {
        TermColor::White
    } else {
        TermColor::Black
    }
}
