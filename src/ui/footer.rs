use crate::machine::ConsoleView;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, area: Rect, view: &ConsoleView<'_>) -> Paragraph<'static> {
        let controls = view.controls;
        let hints: [(&str, &str, bool); 8] = [
            ("r", "Start", controls.start),
            ("x", "Export", controls.export),
            ("s", view.scroll_button_label, controls.toggle_scroll),
            ("e", "Enter", controls.send_enter),
            ("t", "Stop", controls.stop),
            ("o", "Browser", controls.open_browser),
            ("c", "Clear", true),
            ("q", "Quit", true),
        ];

        let enabled_style = Style::default().fg(HEADER_TEXT);
        let disabled_style = Style::default().fg(HEADER_SEPARATOR).add_modifier(Modifier::DIM);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);

        let mut spans = Vec::with_capacity(hints.len() * 2 + 2);
        let mut used_width = 0usize;
        for (index, (key, label, enabled)) in hints.iter().enumerate() {
            let text = format!("{}: {}", key, label);
            if index > 0 {
                spans.push(Span::styled(" │ ", separator_style));
                used_width += 3;
            } else {
                spans.push(Span::styled(" ", separator_style));
                used_width += 1;
            }
            used_width += text.chars().count();
            let style = if *enabled { enabled_style } else { disabled_style };
            spans.push(Span::styled(text, style));
        }

        let version = format!("v{} ", VERSION);
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(used_width)
            .saturating_sub(version.chars().count());
        let dim = enabled_style.add_modifier(Modifier::DIM);
        spans.push(Span::styled(" ".repeat(padding), dim));
        spans.push(Span::styled(version, dim));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
