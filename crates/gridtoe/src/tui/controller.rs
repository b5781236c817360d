//! Screen controller: the state machine driving the TUI.

use crossterm::event::{self, Event, KeyEventKind};
use derive_getters::Getters;
use gridtoe_engine::{MatchHandle, MatchRunner, MatchSession, SessionEvent};
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use super::Theme;
use super::screen::{Screen, ScreenTransition};
use super::screens::{GameScreen, SizeSelectScreen};
use crate::GameConfig;

/// Active screen in the state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Board size picker.
    SizeSelect(SizeSelectScreen),
    /// Match in progress.
    Game(GameScreen),
}

impl ActiveScreen {
    fn render(&self, frame: &mut ratatui::Frame, theme: Theme) {
        match self {
            Self::SizeSelect(s) => s.render(frame, theme),
            Self::Game(s) => s.render(frame, theme),
        }
    }

    fn handle_key(&mut self, key: event::KeyEvent) -> ScreenTransition {
        match self {
            Self::SizeSelect(s) => s.handle_key(key),
            Self::Game(s) => s.handle_key(key),
        }
    }
}

/// The spawned match runner and its channels.
#[derive(Debug)]
struct LiveMatch {
    handle: MatchHandle,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    task: JoinHandle<MatchSession>,
}

/// Controller that owns the current screen and the running match.
///
/// Call [`ScreenController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct ScreenController {
    config: GameConfig,
    theme: Theme,
    screen: ActiveScreen,
    #[getter(skip)]
    live: Option<LiveMatch>,
}

impl ScreenController {
    /// Creates a controller on the size picker.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Self {
        info!("Creating ScreenController");
        let theme = *config.theme();
        let screen = ActiveScreen::SizeSelect(SizeSelectScreen::new(config.board_sizes()));
        Self {
            config,
            theme,
            screen,
            live: None,
        }
    }

    /// Whether a match runner has been started.
    pub fn has_match(&self) -> bool {
        self.live.is_some()
    }

    /// Runs the event loop until the user quits.
    ///
    /// When `initial_size` is given the picker is skipped.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        initial_size: Option<usize>,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting event loop");

        if let Some(size) = initial_size {
            self.apply(ScreenTransition::Play { size })?;
        }

        loop {
            self.drain_events();

            let theme = self.theme;
            terminal.draw(|f| self.screen.render(f, theme))?;

            // Poll for input with short timeout to keep the countdown fresh.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let transition = self.screen.handle_key(key);
                if !self.apply(transition)? {
                    info!("Quitting");
                    break;
                }
            }

            sleep(Duration::from_millis(10)).await;
        }

        self.shutdown().await;
        Ok(())
    }

    /// Forwards pending runner events to the game screen.
    ///
    /// Events arriving while the picker is shown are dropped; the next
    /// snapshot after returning to the game carries the full state.
    #[instrument(skip(self))]
    pub fn drain_events(&mut self) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        while let Ok(event) = live.events.try_recv() {
            if let ActiveScreen::Game(screen) = &mut self.screen {
                screen.apply_event(event);
            }
        }
    }

    /// Applies a screen transition. Returns `false` when the app should quit.
    ///
    /// # Errors
    ///
    /// Fails if a match cannot be created for the requested size or the
    /// runner has stopped unexpectedly.
    #[instrument(skip(self))]
    pub fn apply(&mut self, transition: ScreenTransition) -> anyhow::Result<bool> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Play { size } => {
                self.start_or_resize(size)?;
                self.screen = ActiveScreen::Game(GameScreen::new(size));
            }
            ScreenTransition::Send(command) => match &self.live {
                Some(live) => live.handle.send(command)?,
                None => warn!(command = ?command, "No match running, command dropped"),
            },
            ScreenTransition::GoToSizeSelect => {
                info!("Navigating to SizeSelect");
                // Leaving the board abandons the match and stops its clock.
                if let Some(live) = &self.live {
                    live.handle.new_match()?;
                    live.handle.pause()?;
                }
                let sizes = self.config.board_sizes();
                self.screen = ActiveScreen::SizeSelect(SizeSelectScreen::new(sizes));
            }
            ScreenTransition::ToggleTheme => {
                self.theme = self.theme.toggle();
                info!(theme = %self.theme, "Theme toggled");
            }
            ScreenTransition::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Spawns the runner on first play, otherwise asks it to change size.
    #[instrument(skip(self))]
    fn start_or_resize(&mut self, size: usize) -> anyhow::Result<()> {
        if let Some(live) = &self.live {
            info!(size, "Changing board size");
            live.handle.change_board_size(size)?;
            return Ok(());
        }

        let session = MatchSession::with_turn_units(size, *self.config.turn_seconds())?;
        let (runner, handle, events) = MatchRunner::new(session, self.config.tick());
        let task = tokio::spawn(runner.run());
        info!(size, "Match runner spawned");
        self.live = Some(LiveMatch {
            handle,
            events,
            task,
        });
        Ok(())
    }

    /// Drops the command handle and waits for the runner to finish.
    #[instrument(skip(self))]
    async fn shutdown(&mut self) {
        let Some(LiveMatch { handle, task, .. }) = self.live.take() else {
            return;
        };
        drop(handle);
        match task.await {
            Ok(session) => info!(
                cross_wins = session.wins(gridtoe_engine::Player::Cross),
                nought_wins = session.wins(gridtoe_engine::Player::Nought),
                "Match finished"
            ),
            Err(e) => warn!(error = %e, "Match runner task failed"),
        }
    }
}
