//! Time-driven animation frames: the searching spinner and the flames.

use std::time::{SystemTime, UNIX_EPOCH};

/// Braille spinner characters for the searching indicator.
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Lines shown while a search is under way.
const SEARCH_MESSAGES: [&str; 8] = [
    "Branches snap underfoot...",
    "The trees lean closer...",
    "Your breath fogs in the cold...",
    "Something rustles nearby...",
    "The fire is a speck behind you...",
    "Roots catch at your boots...",
    "An owl goes quiet...",
    "You keep your eyes low...",
];

/// Flame tips, cycled to flicker.
const FLAME_TIPS: [&str; 4] = ["  (  )  ", "  )  (  ", " (  ) ) ", " ( (  ) "];

fn current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// The spinner cycles every 100ms.
pub fn spinner_char() -> char {
    SPINNER[((current_millis() / 100) % SPINNER.len() as u128) as usize]
}

/// A message that stays put for a given seed.
pub fn search_message(seed: u64) -> &'static str {
    SEARCH_MESSAGES[(seed.wrapping_mul(7) as usize) % SEARCH_MESSAGES.len()]
}

/// The flame tip for the current moment, changing every 200ms.
pub fn flame_tip() -> &'static str {
    FLAME_TIPS[((current_millis() / 200) % FLAME_TIPS.len() as u128) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_is_braille() {
        assert!(SPINNER.contains(&spinner_char()));
    }

    #[test]
    fn test_search_message_stable_per_seed() {
        assert_eq!(search_message(3), search_message(3));
        for seed in 0..20 {
            assert!(SEARCH_MESSAGES.contains(&search_message(seed)));
        }
    }

    #[test]
    fn test_flame_tips_same_width() {
        let width = FLAME_TIPS[0].chars().count();
        assert!(FLAME_TIPS.iter().all(|t| t.chars().count() == width));
        assert!(FLAME_TIPS.contains(&flame_tip()));
    }
}
