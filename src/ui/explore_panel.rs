use super::throbber::{search_message, spinner_char};
use crate::core::simulation::{RunState, Simulation};
use crate::exploration::types::ExplorationPhase;
use rand::Rng;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draws the options for wherever the player currently is.
pub fn draw_explore_panel<R: Rng>(frame: &mut Frame, area: Rect, sim: &Simulation<R>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Forest ");

    let lines: Vec<Line> = panel_text(sim)
        .into_iter()
        .map(|(text, color)| Line::from(Span::styled(text, Style::default().fg(color))))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Panel contents as coloured lines.
pub fn panel_text<R: Rng>(sim: &Simulation<R>) -> Vec<(String, Color)> {
    let expedition = match sim.run_state() {
        RunState::Won | RunState::Lost => {
            return vec![("The night is over. [Q] to leave.".to_string(), Color::Gray)]
        }
        RunState::AtCamp => {
            let cooldown = sim.explore_cooldown();
            return if cooldown > 0.0 {
                vec![(
                    format!("Too tired to head out ({:.0}s)", cooldown.ceil()),
                    Color::DarkGray,
                )]
            } else {
                vec![("[E] Explore the forest".to_string(), Color::White)]
            };
        }
        RunState::Exploring(expedition) => expedition,
    };

    let back = ("[R] Return to camp".to_string(), Color::White);
    match expedition.phase {
        ExplorationPhase::MenuOpen => vec![
            (expedition.cost.label(), Color::Yellow),
            ("[1] Gather wood".to_string(), Color::White),
            ("[2] Search for food".to_string(), Color::White),
            ("[Esc] Stay by the fire".to_string(), Color::Gray),
        ],
        ExplorationPhase::Searching(_) => {
            let mut line = format!(
                "{} {}",
                spinner_char(),
                search_message(sim.clock().elapsed() as u64)
            );
            if let Some(remaining) = sim.search_remaining() {
                line.push_str(&format!(" ({:.1}s)", remaining));
            }
            vec![(line, Color::Cyan)]
        }
        ExplorationPhase::WoodResult(find) => vec![(find.message().to_string(), Color::Yellow), back],
        ExplorationPhase::FoodResult(find) => vec![(find.message().to_string(), Color::Yellow), back],
        ExplorationPhase::PredatorResult(fight) => {
            let color = if fight.won { Color::Green } else { Color::Red };
            vec![(fight.message().to_string(), color), back]
        }
        ExplorationPhase::PredatorEncounter => {
            let mut lines = vec![("A predator blocks the path back!".to_string(), Color::Red)];
            if let Some(cost) = expedition.predator {
                lines.push((format!("[F] Fight ({})", cost.fight_label()), Color::White));
                lines.push((format!("[R] Run ({})", cost.run_label()), Color::White));
            }
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SurvivalConfig;
    use crate::core::tick::TickInput;

    fn texts(sim: &Simulation) -> Vec<String> {
        panel_text(sim).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_camp_offers_exploring() {
        let sim = Simulation::seeded(SurvivalConfig::without_decay(), 1);
        assert_eq!(texts(&sim), vec!["[E] Explore the forest"]);
    }

    #[test]
    fn test_menu_then_cooldown() {
        let mut sim = Simulation::seeded(SurvivalConfig::without_decay(), 1);
        sim.open_explore_menu().unwrap();
        let menu = texts(&sim);
        assert!(menu[0].starts_with("Time -"));
        assert_eq!(menu.len(), 4);

        sim.close_explore_menu().unwrap();
        sim.tick(1.0, TickInput::default());
        assert_eq!(texts(&sim), vec!["Too tired to head out (7s)"]);
    }

    #[test]
    fn test_search_counts_down() {
        let mut sim = Simulation::seeded(SurvivalConfig::without_decay(), 2);
        sim.open_explore_menu().unwrap();
        sim.commit_food().unwrap();
        assert!(texts(&sim)[0].ends_with("(3.0s)"));

        sim.tick(1.0, TickInput::default());
        assert_eq!(sim.search_remaining(), Some(2.0));
        assert!(texts(&sim)[0].ends_with("(2.0s)"));
    }

    #[test]
    fn test_result_offers_return() {
        let mut sim = Simulation::seeded(SurvivalConfig::without_decay(), 2);
        sim.open_explore_menu().unwrap();
        sim.commit_wood().unwrap();
        sim.tick(3.0, TickInput::default());
        assert_eq!(texts(&sim).last().unwrap(), "[R] Return to camp");
    }
}
