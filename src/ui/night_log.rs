use super::camp_view::{CampView, Tone};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the log, newest entry at the top.
pub fn draw_night_log(frame: &mut Frame, area: Rect, view: &CampView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Log ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_width = inner.width as usize;
    let lines: Vec<Line> = view
        .log
        .iter()
        .rev()
        .take(inner.height as usize)
        .map(|entry| {
            let (color, modifier) = match entry.tone {
                Tone::Neutral => (Color::Gray, Modifier::empty()),
                Tone::Good => (Color::Green, Modifier::empty()),
                Tone::Bad => (Color::Red, Modifier::BOLD),
                Tone::Eerie => (Color::Magenta, Modifier::ITALIC),
            };
            Line::from(Span::styled(
                truncate(&entry.message, max_width),
                Style::default().fg(color).add_modifier(modifier),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Cuts a message to `width` characters, marking the cut with an ellipsis.
fn truncate(message: &str, width: usize) -> String {
    if message.chars().count() <= width {
        return message.to_string();
    }
    let mut cut: String = message.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
