//! Simulation report generation.

use super::runner::{NightOutcome, RunStats};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from many simulated nights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub wins: u32,
    pub losses: u32,
    pub timeouts: u32,
    pub win_rate: f64,

    /// Losses keyed by the stat that ran out.
    pub losses_by_cause: BTreeMap<String, u32>,
    /// Average clock seconds at which lost nights ended.
    pub avg_elapsed_at_loss: f64,

    // Survivors' state at sunrise
    pub avg_final_sanity: f64,
    pub avg_final_hunger: f64,
    pub avg_final_fire: f64,

    // Exploration
    pub avg_wood_trips: f64,
    pub avg_food_trips: f64,
    pub wood_finds: BTreeMap<String, u32>,
    pub food_finds: BTreeMap<String, u32>,
    /// Share of food trips that ended in a dead roll.
    pub dead_roll_rate: f64,
    pub predator_encounters: u32,
    pub predator_fights: u32,
    pub predator_win_rate: f64,
    pub predator_escapes: u32,

    // Whispers
    pub avg_whispers: f64,
    pub whistle_success_rate: f64,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}

fn sum_of(runs: &[RunStats], field: impl Fn(&RunStats) -> u32) -> u32 {
    runs.iter().map(field).sum()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

impl SimReport {
    /// Create a new report from finished nights.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let wins = runs.iter().filter(|r| r.survived()).count() as u32;
        let timeouts = runs
            .iter()
            .filter(|r| r.outcome == Some(NightOutcome::TimedOut))
            .count() as u32;
        let losses = num_runs - wins - timeouts;

        let mut losses_by_cause = BTreeMap::new();
        for run in &runs {
            if let Some(NightOutcome::Lost(stat)) = run.outcome {
                *losses_by_cause.entry(stat.name().to_lowercase()).or_insert(0) += 1;
            }
        }
        let avg_elapsed_at_loss = mean(
            runs.iter()
                .filter(|r| matches!(r.outcome, Some(NightOutcome::Lost(_))))
                .map(|r| r.elapsed),
        );

        let avg_final_sanity = mean(runs.iter().filter(|r| r.survived()).map(|r| r.final_sanity));
        let avg_final_hunger = mean(runs.iter().filter(|r| r.survived()).map(|r| r.final_hunger));
        let avg_final_fire = mean(runs.iter().filter(|r| r.survived()).map(|r| r.final_fire));

        let food_trips = sum_of(&runs, |r| r.food_trips);
        let dead_rolls = sum_of(&runs, |r| r.dead_rolls);
        let predator_encounters = sum_of(&runs, |r| r.predators);
        let wood_finds = BTreeMap::from([
            ("nothing".to_string(), sum_of(&runs, |r| r.empty_wood)),
            ("stick".to_string(), sum_of(&runs, |r| r.sticks)),
            ("log".to_string(), sum_of(&runs, |r| r.logs)),
        ]);
        let food_finds = BTreeMap::from([
            ("nothing".to_string(), sum_of(&runs, |r| r.empty_food)),
            ("berries".to_string(), sum_of(&runs, |r| r.berries)),
            ("rabbit".to_string(), sum_of(&runs, |r| r.rabbits)),
            ("predator".to_string(), predator_encounters),
            ("dead_roll".to_string(), dead_rolls),
        ]);

        let predator_fights = sum_of(&runs, |r| r.fights);
        let predator_win_rate = ratio(sum_of(&runs, |r| r.fights_won), predator_fights);
        let predator_escapes = sum_of(&runs, |r| r.escapes);
        let whistle_success_rate = ratio(
            sum_of(&runs, |r| r.whistled_back),
            sum_of(&runs, |r| r.whispers),
        );
        let avg_wood_trips = mean(runs.iter().map(|r| f64::from(r.wood_trips)));
        let avg_food_trips = mean(runs.iter().map(|r| f64::from(r.food_trips)));
        let avg_whispers = mean(runs.iter().map(|r| f64::from(r.whispers)));

        Self {
            num_runs,
            wins,
            losses,
            timeouts,
            win_rate: ratio(wins, num_runs),
            losses_by_cause,
            avg_elapsed_at_loss,
            avg_final_sanity,
            avg_final_hunger,
            avg_final_fire,
            avg_wood_trips,
            avg_food_trips,
            wood_finds,
            food_finds,
            dead_roll_rate: ratio(dead_rolls, food_trips),
            predator_encounters,
            predator_fights,
            predator_win_rate,
            predator_escapes,
            avg_whispers,
            whistle_success_rate,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                   CAMPFIRE NIGHT REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Nights: {} total, {} survived, {} lost, {} timed out\n\n",
            self.num_runs, self.wins, self.losses, self.timeouts
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Survival Rate:       {:.1}%\n",
            self.win_rate * 100.0
        ));
        for (cause, n) in &self.losses_by_cause {
            report.push_str(&format!("  Lost to {:<12} {}\n", format!("{}:", cause), n));
        }
        if self.losses > 0 {
            report.push_str(&format!(
                "  Avg Loss Time:       {:.1}s\n",
                self.avg_elapsed_at_loss
            ));
        }
        report.push('\n');

        report.push_str("── AT SUNRISE ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Sanity:          {:.1}\n",
            self.avg_final_sanity
        ));
        report.push_str(&format!(
            "  Avg Hunger:          {:.1}\n",
            self.avg_final_hunger
        ));
        report.push_str(&format!("  Avg Fire:            {:.1}\n\n", self.avg_final_fire));

        report.push_str("── EXPLORATION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Wood Trips:      {:.2}\n",
            self.avg_wood_trips
        ));
        report.push_str(&format!(
            "  Avg Food Trips:      {:.2}\n",
            self.avg_food_trips
        ));
        push_distribution(&mut report, "Wood", &self.wood_finds);
        push_distribution(&mut report, "Food", &self.food_finds);
        report.push_str(&format!(
            "  Predators:           {} met, {} fought ({:.1}% won), {} fled\n\n",
            self.predator_encounters,
            self.predator_fights,
            self.predator_win_rate * 100.0,
            self.predator_escapes
        ));

        report.push_str("── WHISPERS ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Per Night:       {:.1}\n", self.avg_whispers));
        report.push_str(&format!(
            "  Whistled Back:       {:.1}%\n\n",
            self.whistle_success_rate * 100.0
        ));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.9 {
            "TOO EASY - Almost everyone sees sunrise"
        } else if self.win_rate > 0.5 {
            "GOOD - Tense but survivable"
        } else if self.win_rate > 0.2 {
            "HARD - Most nights are lost"
        } else {
            "TOO HARD - Sunrise is a rumour"
        };
        report.push_str(&format!("  Rating:          {}\n", rating));

        if self.dead_roll_rate > 0.05 {
            report.push_str(&format!(
                "  ⚠️  {:.1}% of food trips were dead rolls\n",
                self.dead_roll_rate * 100.0
            ));
        }
        if let Some((cause, n)) = self.losses_by_cause.iter().max_by_key(|(_, n)| **n) {
            if *n * 2 > self.losses && self.losses >= 10 {
                report.push_str(&format!("  ⚠️  Most losses come from {}\n", cause));
            }
        }
        if self.timeouts > 0 {
            report.push_str("  ⚠️  Some nights hit the tick limit\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn push_distribution(report: &mut String, label: &str, finds: &BTreeMap<String, u32>) {
    let total: u32 = finds.values().sum();
    report.push_str(&format!("  {} finds:\n", label));
    for (name, n) in finds {
        let pct = ratio(*n, total) * 100.0;
        let bar = "█".repeat((pct / 5.0) as usize);
        report.push_str(&format!("    {:<10} {:>5.1}% {}\n", name, pct, bar));
    }
}
