/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use config::GameConfig;
use sim::event::GameEvent;
use sim::level::LevelSet;
use sim::session::Session;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::{SoundEngine, Sfx};

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    if let Some(path) = &config.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Logging disabled: {e}");
        }
    }

    // Bad level files are reported here, before the terminal is taken over.
    let levels = match LevelSet::load(&config.levels_dir) {
        Ok(levels) => levels,
        Err(e) => {
            eprintln!("Level load failed: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(levels = levels.level_ids().count(), "levels ready");

    let mut session = Session::new(levels, config.sim.clone());
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut session, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Finding Dodo!");
    println!("Eggs collected: {}", session.ledger().count());
}

/// File-backed subscriber. The terminal is in raw alternate-screen mode
/// while playing, so nothing goes to stderr.
fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("finding_dodo=info"))?)
        .try_init()?;
    Ok(())
}

fn game_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    kb.honor_release = renderer.reports_key_release();
    let mut gp = GamepadState::new(&config.gamepad);

    let tick_rate = Duration::from_millis(config.sim.timing.tick_rate_ms.max(1));
    let dt = tick_rate.as_secs_f32();
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();
        gp.update();

        if kb.quit_requested() {
            tracing::info!("quit requested");
            break;
        }

        // Held flags follow the latest poll; presses queue up until the tick.
        session.handle_intent(kb.intent().merge(gp.intent()));

        if last_tick.elapsed() >= tick_rate {
            let events = session.update(dt);
            play_sounds(sound, &events);
            renderer.notify(&events, config.sim.progress.required_collectibles);
            last_tick = Instant::now();
        }

        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn play_sounds(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let Some(engine) = sound else {
        return;
    };
    for sfx in events.iter().filter_map(Sfx::for_event) {
        engine.play(sfx);
    }
}
