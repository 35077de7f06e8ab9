use crate::dispatch::{Notification, NotificationLevel};
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{layout_regions, toast_rect};
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_INFO, STATUS_OK,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let view = app.view();

    frame.render_widget(Header::new().widget(&view), header);
    frame.render_widget(Clear, body);
    draw_log(frame, body, view.log, app.log_offset());
    frame.render_widget(Footer::new().widget(footer, &view), footer);

    if let Some(notification) = app.notification() {
        draw_toast(frame, body, notification);
    }
}

fn draw_log(frame: &mut Frame<'_>, area: Rect, log: &[String], offset: usize) {
    let height = area.height.saturating_sub(2) as usize;
    let end = log.len().saturating_sub(offset);
    let start = end.saturating_sub(height);

    let lines: Vec<Line> = if log.is_empty() {
        vec![Line::styled(
            "No output yet.",
            Style::default().fg(HEADER_SEPARATOR).add_modifier(Modifier::DIM),
        )]
    } else {
        log[start..end]
            .iter()
            .map(|line| Line::styled(line.as_str(), log_line_style(line)))
            .collect()
    };

    let title = if offset > 0 {
        format!(" Log (+{} below, End to follow) ", offset)
    } else {
        " Log ".to_string()
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    );
    frame.render_widget(widget, area);
}

fn log_line_style(line: &str) -> Style {
    if line.starts_with("===") {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else if line.starts_with("[ERROR]") {
        Style::default().fg(STATUS_ERROR)
    } else if line.starts_with('[') {
        Style::default().fg(STATUS_INFO)
    } else {
        Style::default().fg(HEADER_TEXT)
    }
}

fn draw_toast(frame: &mut Frame<'_>, body: Rect, notification: &Notification) {
    let (title, color) = match notification.level {
        NotificationLevel::Info => (" Info ", STATUS_INFO),
        NotificationLevel::Success => (" Done ", STATUS_OK),
        NotificationLevel::Error => (" Error ", STATUS_ERROR),
    };
    let width = u16::try_from(notification.message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .max(20);
    let rect = toast_rect(width, 3, body);
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(HEADER_TEXT))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        rect,
    );
}
