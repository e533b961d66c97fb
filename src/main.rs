use campfire::build_info;
use campfire::core::config::SurvivalConfig;
use campfire::core::constants::{INPUT_POLL_MS, TICK_INTERVAL_MS};
use campfire::core::simulation::Simulation;
use campfire::core::sinks::Sinks;
use campfire::core::tick::TickInput;
use campfire::input::{map_key, InputAction};
use campfire::ui::camp_view::Tone;
use campfire::ui::{draw_camp, ViewHandle};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

struct Options {
    config: SurvivalConfig,
    seed: Option<u64>,
    log_path: PathBuf,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("campfire: {}", message);
            eprintln!("Run 'campfire --help' for usage.");
            std::process::exit(1);
        }
    };

    init_logging(&options.log_path)?;
    tracing::info!(version = %build_info::version_line(), seed = ?options.seed, "starting");

    let mut sim = match options.seed {
        Some(seed) => Simulation::seeded(options.config, seed),
        None => Simulation::new(options.config),
    };

    let view = ViewHandle::default();
    let mut sinks = Sinks::new()
        .with_display(view.clone())
        .with_effects(view.clone())
        .with_scene(view.clone());
    view.borrow_mut()
        .push_log("The fire crackles. Sunrise is a long way off.", Tone::Neutral);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut sim, &mut sinks, &view);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result?;
    match view.borrow().ending {
        Some(campfire::ui::camp_view::Ending::Sunrise) => println!("You saw the sunrise."),
        Some(campfire::ui::camp_view::Ending::Lost(stat)) => {
            println!("The night took you. Your {} ran out.", stat.name().to_lowercase())
        }
        None => println!("You slip away before dawn."),
    }
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    sim: &mut Simulation,
    sinks: &mut Sinks,
    view: &ViewHandle,
) -> io::Result<()> {
    let tick_interval = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last_tick = Instant::now();
    let mut whistle_queued = false;

    loop {
        terminal.draw(|frame| draw_camp(frame, &view.borrow(), sim))?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(key, sim) {
                        InputAction::Quit => break,
                        InputAction::Whistle => whistle_queued = true,
                        InputAction::Command(command) => match command.apply(sim) {
                            Ok(events) => {
                                view.borrow_mut().record_command(&events);
                                sinks.dispatch(&events);
                            }
                            Err(err) => {
                                tracing::debug!(?command, %err, "command rejected");
                                view.borrow_mut().push_log(err.to_string(), Tone::Neutral);
                            }
                        },
                        InputAction::Ignore => {}
                    }
                }
            }
        }

        // Simulation tick every 100ms, with the real elapsed time
        let since = last_tick.elapsed();
        if since >= tick_interval {
            let input = TickInput {
                whistle: std::mem::take(&mut whistle_queued),
            };
            let result = sim.tick(since.as_secs_f64(), input);
            sinks.deliver(&result);
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut config_path: Option<String> = None;
    let mut seed = None;
    let mut log_path = std::env::temp_dir().join("campfire.log");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--config" | "-c" => {
                let path = args.get(i + 1).ok_or("--config needs a path")?;
                config_path = Some(path.clone());
                i += 1;
            }
            "--seed" | "-s" => {
                let raw = args.get(i + 1).ok_or("--seed needs a number")?;
                seed = Some(
                    raw.parse::<u64>()
                        .map_err(|_| format!("invalid seed: {}", raw))?,
                );
                i += 1;
            }
            "--log" => {
                let path = args.get(i + 1).ok_or("--log needs a path")?;
                log_path = PathBuf::from(path);
                i += 1;
            }
            other => return Err(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            SurvivalConfig::load(&path).map_err(|err| format!("{}: {}", path, err))?
        }
        None => SurvivalConfig::default(),
    };

    Ok(Options {
        config,
        seed,
        log_path,
    })
}

fn print_help() {
    println!("Campfire - survive the night\n");
    println!("Usage: campfire [options]\n");
    println!("Options:");
    println!("  -c, --config <FILE>  Load night tunables from a TOML file");
    println!("  -s, --seed <N>       Play a reproducible night");
    println!("  --log <FILE>         Write logs here (default: campfire.log in the temp dir)");
    println!("  -v, --version        Show version information");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Keys:");
    println!("  Space     Whistle back at whispers");
    println!("  E         Open the explore menu");
    println!("  1 / 2     Gather wood / search for food");
    println!("  F / R     Fight or run from a predator");
    println!("  R, Enter  Return to camp");
    println!("  Esc       Close the explore menu");
    println!("  Q         Quit");
}
