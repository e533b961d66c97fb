// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const INPUT_POLL_MS: u64 = 50;

// Survival stats
pub const STAT_MIN: f64 = 0.0;
pub const STAT_MAX: f64 = 100.0;
pub const STARTING_STAT: f64 = 100.0;

// Decay per second while at camp
pub const SANITY_DECAY_PER_SECOND: f64 = 0.18;
pub const HUNGER_DECAY_PER_SECOND: f64 = 0.32;
pub const FIRE_DECAY_PER_SECOND: f64 = 0.40;
/// Sitting by the fire slowly steadies the mind.
pub const SANITY_REGEN_PER_SECOND: f64 = 1.0;

// Night clock
pub const SUNRISE_SECONDS: f64 = 100.0;
pub const CLOCK_START_HOUR: f64 = 3.0;
pub const CLOCK_END_HOUR: f64 = 6.0;
pub const NIGHT_LIGHT_INTENSITY: f64 = 0.2;
pub const DAY_LIGHT_INTENSITY: f64 = 0.05;

// Exploration costs (inclusive range, rolled per stat)
pub const EXPLORE_COST_MIN: u32 = 1;
pub const EXPLORE_COST_MAX: u32 = 9;
pub const SEARCH_DELAY_SECONDS: f64 = 3.0;
pub const EXPLORE_COOLDOWN_SECONDS: f64 = 8.0;

// Wood table: roll in [0, 100)
pub const WOOD_NOTHING_BELOW: u32 = 20;
pub const WOOD_STICK_BELOW: u32 = 70;
pub const WOOD_STICK_FIRE: f64 = 15.0;
pub const WOOD_LOG_FIRE: f64 = 30.0;
pub const WOOD_FAILURE_STREAK_LIMIT: u32 = 2;
pub const WOOD_FORCED_ROLL: u32 = 80;

// Food table: roll in [0, 100)
pub const FOOD_NOTHING_BELOW: u32 = 18;
pub const FOOD_BERRIES_BELOW: u32 = 58;
pub const FOOD_RABBIT_BELOW: u32 = 88;
pub const FOOD_BERRIES_HUNGER: f64 = 25.0;
pub const FOOD_RABBIT_HUNGER: f64 = 40.0;
/// Predator band width at sunrise, grows linearly from zero at 3 AM.
pub const PREDATOR_MAX_CHANCE: f64 = 35.0;

// Predator fight
pub const PREDATOR_SANITY_WEIGHT: f64 = 0.6;
pub const PREDATOR_HUNGER_WEIGHT: f64 = 0.4;
pub const PREDATOR_WIN_HUNGER: f64 = 80.0;

// Whisper / whistle reaction game
pub const WHISPER_MIN_DELAY_SECONDS: f64 = 10.0;
pub const WHISPER_MAX_DELAY_SECONDS: f64 = 25.0;
pub const WHISPER_REACTION_SECONDS: f64 = 3.0;
pub const WHISPER_SANITY_PENALTY: f64 = 25.0;
pub const WHISTLE_SANITY_REWARD: f64 = 10.0;
pub const WHISPER_VOICES: u32 = 4;

// Whistle hint
pub const HINT_SANITY_THRESHOLD: f64 = 65.0;
pub const HINT_DURATION_SECONDS: f64 = 7.0;
