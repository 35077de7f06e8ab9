use crate::machine::ConsoleView;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_IDLE, STATUS_OK};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, view: &ConsoleView<'_>) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let dot_color = if view.running { STATUS_OK } else { STATUS_IDLE };

        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled("●", Style::default().fg(dot_color)),
            Span::styled("  ", text_style),
            Span::styled(view.status_label, text_style.add_modifier(Modifier::BOLD)),
            Span::styled("  │  ", separator_style),
            Span::styled(view.task_label.to_string(), text_style),
        ];
        if view.scroll_status_visible {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled(
                " AUTO-SCROLL ",
                Style::default().fg(ACCENT).add_modifier(Modifier::REVERSED),
            ));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
