use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::future::Future;
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{Game, GameConfig, Ticker};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// Roughly one display refresh; the ticker decides which frames step the game
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Interactive terminal session
pub struct PlayMode {
    config: GameConfig,
    seed: Option<u64>,
    game: Game,
    ticker: Ticker,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let game = new_game(&config, seed)?;

        Ok(Self {
            config,
            seed,
            game,
            ticker: Ticker::start(Instant::now()),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        // Restore runs even when setup past raw mode fails
        let result = restoring(self.run_in_terminal(), restore_terminal).await;

        info!(
            length = self.game.snake().len(),
            steps = self.game.steps(),
            "session ended"
        );

        result
    }

    async fn run_in_terminal(&mut self) -> Result<()> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        self.run_game_loop(&mut terminal).await
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.ticker = Ticker::start(Instant::now());

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Step if due, then redraw
                _ = frame_timer.tick() => {
                    self.on_frame(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action)?;
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Steer(heading) => {
                self.game.set_heading(heading);
            }
            KeyAction::Restart => self.reset_game()?,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn on_frame(&mut self, now: Instant) {
        self.ticker.tick(now, &mut self.game);
    }

    fn reset_game(&mut self) -> Result<()> {
        self.game = new_game(&self.config, self.seed)?;
        self.ticker = Ticker::start(Instant::now());
        info!("game restarted");
        Ok(())
    }
}

/// Await `body`, then call `restore` whatever the outcome
///
/// The body's error wins over a restore error.
async fn restoring<T, F, C>(body: F, restore: C) -> Result<T>
where
    F: Future<Output = Result<T>>,
    C: FnOnce() -> Result<()>,
{
    let result = body.await;
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(stderr(), LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen");
    raw.and(screen)
}

fn new_game(config: &GameConfig, seed: Option<u64>) -> Result<Game> {
    let game = match seed {
        Some(seed) => Game::seeded(config.clone(), seed),
        None => Game::new(config.clone()),
    };
    game.context("Invalid game configuration")
}
