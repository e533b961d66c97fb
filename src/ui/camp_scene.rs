use super::camp_view::CampView;
use super::throbber::flame_tip;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Glyphs that creep into the picture as sanity slips.
const NOISE: [char; 5] = ['░', '▒', '·', '\'', '`'];

/// Draws the sky and the fire.
pub fn draw_camp_scene(frame: &mut Frame, area: Rect, view: &CampView) {
    let (progress, glow, distortion) = view
        .frame
        .as_ref()
        .map(|f| (f.progress, f.fire_glow, f.distortion))
        .unwrap_or((0.0, 1.0, 0.0));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(sky_color(progress)))
        .title(" Camp ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let seed = (progress * 1_000.0) as u64;
    let mut lines: Vec<Line> = Vec::new();

    let art = fire_art(glow);
    let padding = (inner.height as usize).saturating_sub(art.len() + 1);
    for row in 0..padding {
        let sky = sky_row(inner.width as usize, row as u64 + seed);
        lines.push(Line::from(Span::styled(
            distort(&sky, distortion, seed + row as u64),
            Style::default().fg(sky_color(progress)),
        )));
    }

    for (row, art_line) in art.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            distort(art_line, distortion, seed + 97 + row as u64),
            Style::default()
                .fg(flame_color(glow))
                .add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Draws the sanity, hunger and fire bars.
pub fn draw_stat_gauges(frame: &mut Frame, area: Rect, view: &CampView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let (sanity, hunger, fire) = match (&view.frame, view.away_sanity) {
        (_, Some(away)) => (
            away * 100.0,
            view.frame.as_ref().map_or(100.0, |f| f.hunger),
            view.frame.as_ref().map_or(100.0, |f| f.fire),
        ),
        (Some(f), None) => (f.sanity, f.hunger, f.fire),
        (None, None) => (100.0, 100.0, 100.0),
    };

    for (chunk, (title, value)) in chunks
        .iter()
        .zip([("Sanity", sanity), ("Hunger", hunger), ("Fire", fire)])
    {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .gauge_style(
                Style::default()
                    .fg(stat_color(value))
                    .add_modifier(Modifier::BOLD),
            )
            .label(format!("{:.0}/100", value))
            .ratio((value / 100.0).clamp(0.0, 1.0));
        frame.render_widget(gauge, *chunk);
    }
}

fn stat_color(value: f64) -> Color {
    if value > 60.0 {
        Color::Green
    } else if value > 30.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Night blue shading into dawn orange.
fn sky_color(progress: f64) -> Color {
    if progress < 0.5 {
        Color::Blue
    } else if progress < 0.85 {
        Color::Magenta
    } else {
        Color::LightYellow
    }
}

fn flame_color(glow: f64) -> Color {
    if glow > 0.6 {
        Color::LightYellow
    } else if glow > 0.3 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// A row of sparse stars.
fn sky_row(width: usize, seed: u64) -> String {
    (0..width)
        .map(|i| {
            if scramble(seed, i as u64) % 23 == 0 {
                '.'
            } else {
                ' '
            }
        })
        .collect()
}

/// Fire drawing, taller the more fuel is left.
pub fn fire_art(glow: f64) -> Vec<String> {
    let logs = " ==\\\\//== ".to_string();
    if glow <= 0.0 {
        return vec!["   ....   ".to_string(), logs];
    }
    let tip = flame_tip().to_string();
    let mut art = Vec::new();
    if glow > 0.66 {
        art.push(tip.clone());
        art.push(" ( () ) ".to_string());
    }
    if glow > 0.33 {
        art.push(tip);
    }
    art.push("  )\\/(  ".to_string());
    art.push(logs);
    art
}

fn scramble(seed: u64, index: u64) -> u64 {
    let mut x = seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(index.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    x ^= x >> 31;
    x.wrapping_mul(0x94D0_49BB_1331_11EB) >> 11
}

/// Swaps characters for noise with a probability that grows with `amount`.
pub fn distort(line: &str, amount: f64, seed: u64) -> String {
    let threshold = (amount.clamp(0.0, 1.0) * 40.0) as u64;
    line.chars()
        .enumerate()
        .map(|(i, c)| {
            let roll = scramble(seed, i as u64);
            if roll % 100 < threshold {
                NOISE[(roll / 100) as usize % NOISE.len()]
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_distortion_when_sane() {
        let line = "a quiet night";
        assert_eq!(distort(line, 0.0, 42), line);
    }

    #[test]
    fn test_full_distortion_changes_something() {
        let line = "x".repeat(200);
        let distorted = distort(&line, 1.0, 7);
        assert_eq!(distorted.chars().count(), 200);
        assert_ne!(distorted, line);
    }

    #[test]
    fn test_fire_shrinks_with_fuel() {
        assert!(fire_art(1.0).len() > fire_art(0.5).len());
        assert!(fire_art(0.5).len() > fire_art(0.1).len());
        assert_eq!(fire_art(0.0)[0].trim(), "....");
    }

    #[test]
    fn test_stat_colors() {
        assert_eq!(stat_color(90.0), Color::Green);
        assert_eq!(stat_color(45.0), Color::Yellow);
        assert_eq!(stat_color(5.0), Color::Red);
    }
}
