//! Terminal Blockfall runner (default binary).
//!
//! Owns the clock: it polls crossterm for input, feeds actions to the game,
//! runs gravity at the level's fall interval and redraws through the
//! framebuffer renderer. Pause and the game-over gate live here, not in the
//! core.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use blockfall::core::{ActionOutcome, Game, Grid, ViewSnapshot};
use blockfall::input::{handle_key_event, should_quit, InputHandler};
use blockfall::term::{BonusNotice, Frame, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{fall_interval_ms, EventSource, GameAction};
use blockfall::Settings;

const USAGE: &str = "\
Usage: blockfall [--config <path>] [--seed <n>]

Options:
  --config <path>  Load settings from a JSON file
  --seed <n>       Fixed piece seed (overrides the config file)
  -h, --help       Print this help

Keys:
  Left/Right, A/D, H/L   Move
  Down, S, J             Soft drop
  Up, W, K, X            Rotate
  Space                  Hard drop
  C, Shift               Hold
  P, Esc                 Pause
  N, R                   New game
  Q, Ctrl-C              Quit

Set RUST_LOG=debug and redirect stderr (2>blockfall.log) for a game log.";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u32>,
    help: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--seed" => {
                let value = args.next().context("--seed needs a number")?;
                let seed = value
                    .parse()
                    .with_context(|| format!("invalid seed: {}", value))?;
                parsed.seed = Some(seed);
            }
            "-h" | "--help" => parsed.help = true,
            other => bail!("unknown argument: {}\n\n{}", other, USAGE),
        }
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let seed = settings.seed.unwrap_or_else(rand::random::<u32>);
    info!("starting with seed {}", seed);

    let game = Game::new(settings.board, seed).context("invalid board settings")?;
    let mut session = Session::new(game, &settings);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = session.run(&mut term, &settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Driver-side state around one game
struct Session {
    game: Game,
    view: ViewSnapshot,
    background: Grid,
    input: InputHandler,
    paused: bool,
    gravity_ms: u32,
    bonus: BonusNotice,
}

impl Session {
    fn new(game: Game, settings: &Settings) -> Self {
        Self {
            view: game.view(),
            background: game.grid(),
            game,
            input: InputHandler::with_config(settings.das_ms, settings.arr_ms),
            paused: false,
            gravity_ms: 0,
            bonus: BonusNotice::default(),
        }
    }

    fn run(&mut self, term: &mut TerminalRenderer, settings: &Settings) -> Result<()> {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(0, 0);
        let tick = Duration::from_millis(u64::from(settings.tick_ms));
        let mut last_tick = Instant::now();

        loop {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let frame = Frame {
                grid: &self.background,
                view: &self.view,
                paused: self.paused,
                bonus: self.bonus.points(),
            };
            view.render_into(frame, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;

            // Input with timeout until next tick.
            let timeout = tick.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => match key.kind {
                        KeyEventKind::Press => {
                            if should_quit(key) {
                                info!("quit");
                                return Ok(());
                            }
                            if let Some(action) = handle_key_event(key) {
                                self.on_action(action, key.code, term);
                            }
                        }
                        // DAS/ARR produces repeats; terminal auto-repeat is ignored.
                        KeyEventKind::Repeat => {}
                        KeyEventKind::Release => self.input.handle_key_release(key.code),
                    },
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick {
                last_tick = Instant::now();
                self.on_tick(settings.tick_ms);
            }
        }
    }

    fn playable(&self) -> bool {
        !self.paused && !self.game.is_game_over()
    }

    fn on_action(
        &mut self,
        action: GameAction,
        code: crossterm::event::KeyCode,
        term: &mut TerminalRenderer,
    ) {
        match action {
            GameAction::Reset => {
                self.apply(GameAction::Reset, EventSource::User);
                self.paused = false;
                self.gravity_ms = 0;
                self.bonus.clear();
                self.input.reset();
                term.invalidate();
            }
            GameAction::Pause => {
                if !self.game.is_game_over() {
                    self.paused = !self.paused;
                    self.input.reset();
                    info!("{}", if self.paused { "paused" } else { "resumed" });
                }
            }
            _ if !self.playable() => {}
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop => {
                if let Some(first) = self.input.handle_key_press(code) {
                    self.apply(first, EventSource::User);
                }
            }
            other => self.apply(other, EventSource::User),
        }
    }

    fn on_tick(&mut self, elapsed_ms: u32) {
        self.bonus.tick(elapsed_ms);
        if !self.playable() {
            return;
        }

        for action in self.input.update(elapsed_ms) {
            if self.game.is_game_over() {
                break;
            }
            self.apply(action, EventSource::User);
        }

        self.gravity_ms += elapsed_ms;
        if self.gravity_ms >= fall_interval_ms(self.game.level()) && !self.game.is_game_over() {
            self.gravity_ms = 0;
            self.apply(GameAction::SoftDrop, EventSource::Timer);
        }
    }

    fn apply(&mut self, action: GameAction, source: EventSource) {
        debug!("{} from {:?}", action.as_str(), source);
        let outcome = self.game.apply_action(action, source);
        if let Some(grid) = outcome.background() {
            self.background = grid.clone();
        }
        match outcome {
            ActionOutcome::View(view) | ActionOutcome::Reset(view, _) => self.view = view,
            ActionOutcome::Drop(drop) => {
                // A lock restarts the gravity interval for the new piece.
                if drop.locked() {
                    self.gravity_ms = 0;
                }
                if let Some(clear) = drop.clear.as_ref().filter(|c| c.lines_removed > 0) {
                    self.bonus.show(clear.score_bonus);
                }
                self.view = drop.view;
            }
            ActionOutcome::Unhandled => {}
        }
    }
}
