use std::error::Error;
use std::panic;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use torus_snake::config::{Settings, Theme};
use torus_snake::game::{GameState, GameStatus};
use torus_snake::input::{GameInput, InputHandler};
use torus_snake::renderer;
use torus_snake::terminal_runtime::{restore_terminal, TerminalSession};
use torus_snake::ui::hud::HudInfo;

#[derive(Debug, Parser)]
#[command(name = "torus-snake", version, about)]
struct Cli {
    /// Settings file to use instead of the platform default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Target frame duration in milliseconds.
    #[arg(long = "frame-ms")]
    frame_ms: Option<u64>,

    /// Number of food and poison points kept on the board.
    #[arg(long)]
    items: Option<usize>,

    /// Seed the simulation for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme name.
    #[arg(long, default_value = "classic")]
    theme: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        settings.grid_width = width;
    }
    if let Some(height) = cli.height {
        settings.grid_height = height;
    }
    if let Some(frame_ms) = cli.frame_ms {
        settings.frame_duration_ms = frame_ms;
    }
    if let Some(items) = cli.items {
        settings.item_count = items;
    }

    let bounds = settings.grid()?;
    let theme = Theme::by_name(&cli.theme)?;
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(bounds, settings.item_count, seed)?,
        None => GameState::new(bounds, settings.item_count)?,
    };

    install_panic_hook();

    let mut session = TerminalSession::enter()?;
    run(&mut session, state, &settings, theme)
}

fn run(
    session: &mut TerminalSession,
    mut state: GameState,
    settings: &Settings,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let target_frame = Duration::from_millis(settings.frame_duration_ms);
    let mut input = InputHandler::new();
    let mut stats = FrameStats::new();

    loop {
        let frame_start = Instant::now();

        let hud = HudInfo { fps: stats.fps() };
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state, theme, &hud))?;

        while let Some(event) = input.poll_input()? {
            match event {
                GameInput::Quit => return Ok(()),
                GameInput::Restart if state.status == GameStatus::Stopped => {
                    state.restart()?;
                }
                other => state.apply_input(other),
            }
        }

        state.tick();
        stats.on_frame();

        // Pace the loop to the target frame duration.
        let elapsed = frame_start.elapsed();
        if elapsed < target_frame {
            thread::sleep(target_frame - elapsed);
        }
    }
}

/// Rolls a frames-per-second figure once per second for the HUD.
struct FrameStats {
    frames: u32,
    fps: u32,
    window_start: Instant,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frames: 0,
            fps: 0,
            window_start: Instant::now(),
        }
    }

    fn on_frame(&mut self) {
        self.frames += 1;
        if self.window_start.elapsed() >= Duration::from_secs(1) {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }

    fn fps(&self) -> u32 {
        self.fps
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
