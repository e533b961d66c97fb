//! Terminal presentation of a night at camp.

pub mod camp_scene;
pub mod camp_view;
pub mod explore_panel;
pub mod night_log;
pub mod throbber;

use crate::core::simulation::Simulation;
use camp_view::{CampView, Ending};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub use camp_view::ViewHandle;

/// Main UI drawing function
pub fn draw_camp<R: Rng>(frame: &mut Frame, view: &CampView, sim: &Simulation<R>) {
    let size = frame.size();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Clock bar
            Constraint::Min(10),    // Camp and stats
            Constraint::Length(6),  // Forest
            Constraint::Length(8),  // Log
            Constraint::Length(1),  // Footer
        ])
        .split(size);

    draw_clock_bar(frame, v_chunks[0], view, sim);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(v_chunks[1]);
    camp_scene::draw_camp_scene(frame, h_chunks[0], view);
    camp_scene::draw_stat_gauges(frame, h_chunks[1], view);

    explore_panel::draw_explore_panel(frame, v_chunks[2], sim);
    night_log::draw_night_log(frame, v_chunks[3], view);
    draw_footer(frame, v_chunks[4], view);

    if let Some(ending) = view.ending {
        draw_ending(frame, size, ending);
    }
}

fn draw_clock_bar<R: Rng>(frame: &mut Frame, area: Rect, view: &CampView, sim: &Simulation<R>) {
    let clock = sim.clock();
    let mut spans = vec![
        Span::styled(
            " CAMPFIRE ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            clock.format_clock(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Sunrise in {:.0}s", clock.seconds_until_sunrise().ceil()),
            Style::default().fg(Color::Yellow),
        ),
    ];

    if view.whisper.is_some() {
        let remaining = sim.whisper().reaction_remaining().unwrap_or(0.0);
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("WHISPERS ({:.1}s)", remaining),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &CampView) {
    let mut text = String::from(" [Space] Whistle  [E] Explore  [Q] Quit");
    if view.hint_visible {
        text.push_str("   Whistle back when you hear whispers!");
    }
    let footer = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn draw_ending(frame: &mut Frame, size: Rect, ending: Ending) {
    let width = 44.min(size.width);
    let height = 5.min(size.height);
    let area = Rect {
        x: size.x + (size.width - width) / 2,
        y: size.y + (size.height - height) / 2,
        width,
        height,
    };

    let (title, message, color) = match ending {
        Ending::Sunrise => (" Sunrise ", "You survived the night.".to_string(), Color::Yellow),
        Ending::Lost(stat) => (
            " The night wins ",
            format!("Your {} ran out.", stat.name().to_lowercase()),
            Color::Red,
        ),
    };

    let popup = Paragraph::new(vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("[Q] Quit"),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
