//! The frame-paced game loop.

use anyhow::{bail, Context, Result};
use tracing::{debug, info, trace, warn};

use crate::config::GameConfig;
use crate::core::{Render, Update};
use crate::event::{GameEvent, Handler, LoopControl};
use crate::input::ActionBinding;
use crate::pacing::FramePacer;
use crate::term::{DisplayBackend, TerminalDisplay};

/// Lifecycle of a [`TerminalGame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Initializing,
    Running,
    Finalizing,
    Closed,
}

/// Owns the display and drives input, update and render once per tick.
///
/// Update and render targets, as well as handlers, are called in the order
/// they were added.
pub struct TerminalGame<A, D = TerminalDisplay> {
    config: GameConfig,
    display: D,
    updates: Vec<Box<dyn Update>>,
    renders: Vec<Box<dyn Render>>,
    handlers: Vec<Box<dyn Handler<A>>>,
    binding: ActionBinding<A>,
    pacer: FramePacer,
    control: LoopControl,
    state: LoopState,
}

impl<A: Clone> TerminalGame<A, TerminalDisplay> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_display(config, TerminalDisplay::new())
    }
}

impl<A: Clone, D: DisplayBackend> TerminalGame<A, D> {
    pub fn with_display(config: GameConfig, display: D) -> Self {
        let pacer = FramePacer::new(config.fps_limit);
        Self {
            config,
            display,
            updates: Vec::new(),
            renders: Vec::new(),
            handlers: Vec::new(),
            binding: ActionBinding::new(),
            pacer,
            control: LoopControl::default(),
            state: LoopState::Idle,
        }
    }

    pub fn update(mut self, target: impl Update + 'static) -> Self {
        self.updates.push(Box::new(target));
        self
    }

    pub fn render(mut self, target: impl Render + 'static) -> Self {
        self.renders.push(Box::new(target));
        self
    }

    pub fn handler(mut self, handler: impl Handler<A> + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Replace the key binding table.
    pub fn binding(mut self, binding: ActionBinding<A>) -> Self {
        self.binding = binding;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Open the display, dispatch [`GameEvent::Initialize`] and start running.
    ///
    /// A finished game may be launched again.
    pub fn launch(&mut self) -> Result<()> {
        if !matches!(self.state, LoopState::Idle | LoopState::Closed) {
            bail!("cannot launch a game that is {:?}", self.state);
        }
        self.state = LoopState::Initializing;
        self.control = LoopControl::default();

        let config = &self.config;
        if let Err(e) = self
            .display
            .open(config.columns, config.rows, &config.title)
            .context("failed to open display")
        {
            self.state = LoopState::Closed;
            return Err(e);
        }
        info!(
            title = %config.title,
            columns = config.columns,
            rows = config.rows,
            fps_limit = ?config.fps_limit,
            "game launched"
        );

        self.dispatch(&GameEvent::Initialize);
        self.pacer.mark();
        self.state = LoopState::Running;
        self.finish_if_requested()
    }

    /// Run one tick. Any error closes the display and is returned.
    pub fn tick(&mut self) -> Result<()> {
        if self.state != LoopState::Running {
            bail!("cannot tick a game that is {:?}", self.state);
        }
        if let Err(e) = self.step() {
            self.abort();
            return Err(e);
        }
        self.finish_if_requested()
    }

    /// Launch if needed, then tick until the game finishes.
    pub fn run(&mut self) -> Result<()> {
        if self.state != LoopState::Running {
            self.launch()?;
        }
        while self.state == LoopState::Running {
            self.tick()?;
        }
        Ok(())
    }

    /// Dispatch [`GameEvent::Finalize`], release the display and optionally
    /// exit the process. Does nothing unless the game is initializing or
    /// running.
    pub fn finish(&mut self, exit_process: bool) -> Result<()> {
        if !matches!(self.state, LoopState::Initializing | LoopState::Running) {
            debug!(state = ?self.state, "finish ignored");
            return Ok(());
        }
        self.state = LoopState::Finalizing;
        self.dispatch(&GameEvent::Finalize);

        let closed = self.display.close().context("failed to close display");
        self.state = LoopState::Closed;
        closed?;
        info!(exit_process, "game finished");

        if exit_process {
            std::process::exit(0);
        }
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        self.pacer.wait();
        self.handle_input()?;

        let elapsed = self.pacer.elapsed();
        for target in &mut self.updates {
            target.update(elapsed);
        }

        self.display.clear().context("failed to clear display")?;
        let surface = self.display.surface();
        for target in &self.renders {
            target.render(surface);
        }
        self.display.flush().context("failed to flush display")?;

        self.pacer.mark();
        Ok(())
    }

    fn handle_input(&mut self) -> Result<()> {
        while let Some(key) = self.display.poll_input().context("failed to poll input")? {
            match self.binding.resolve(&key) {
                Some(action) => self.dispatch(&GameEvent::Action(action)),
                None => trace!(code = ?key.code, "unbound key dropped"),
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, event: &GameEvent<A>) {
        for handler in &mut self.handlers {
            handler.handle(&mut self.control, event);
        }
    }

    fn finish_if_requested(&mut self) -> Result<()> {
        match self.control.take_finish() {
            Some(exit_process) => self.finish(exit_process),
            None => Ok(()),
        }
    }

    fn abort(&mut self) {
        if let Err(e) = self.display.close() {
            warn!(error = %e, "failed to close display after loop error");
        }
        self.state = LoopState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UpdateFn;
    use crate::term::{HeadlessDisplay, Operation};
    use crossterm::event::{KeyCode, KeyEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config() -> GameConfig {
        GameConfig::new("test", 4, 2).with_fps_limit(None)
    }

    #[test]
    fn test_lifecycle_moves_through_states() {
        let mut game: TerminalGame<(), _> =
            TerminalGame::with_display(config(), HeadlessDisplay::new());
        assert_eq!(game.state(), LoopState::Idle);
        game.launch().unwrap();
        assert_eq!(game.state(), LoopState::Running);
        assert!(game.display().is_open());
        game.tick().unwrap();
        game.finish(false).unwrap();
        assert_eq!(game.state(), LoopState::Closed);
        assert!(!game.display().is_open());
    }

    #[test]
    fn test_ticking_before_launch_is_an_error() {
        let mut game: TerminalGame<(), _> =
            TerminalGame::with_display(config(), HeadlessDisplay::new());
        assert!(game.tick().is_err());
    }

    #[test]
    fn test_finish_requested_by_handler_runs_after_the_tick() {
        let updates = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&updates);
        let mut display = HeadlessDisplay::new();
        display.push_input(KeyEvent::from(KeyCode::Char('q')));

        let mut game = TerminalGame::with_display(config(), display)
            .binding(ActionBinding::new().bind(KeyCode::Char('q'), "quit"))
            .update(UpdateFn(move |_: f32| *counter.borrow_mut() += 1))
            .handler(|control: &mut LoopControl, event: &GameEvent<&'static str>| {
                if event.action() == Some(&"quit") {
                    control.request_finish(false);
                }
            });
        game.run().unwrap();

        assert_eq!(*updates.borrow(), 1);
        assert_eq!(game.display().frames().len(), 1);
        assert_eq!(game.state(), LoopState::Closed);
    }

    #[test]
    fn test_failed_open_leaves_game_closed() {
        let mut game: TerminalGame<(), _> = TerminalGame::with_display(
            config(),
            HeadlessDisplay::new().failing_on(Operation::Open),
        );
        let err = game.launch().unwrap_err();
        assert!(err.to_string().contains("open display"));
        assert_eq!(game.state(), LoopState::Closed);
    }
}
