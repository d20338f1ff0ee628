//! Events delivered to game handlers.

/// Lifecycle or input event dispatched by the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent<A> {
    /// Dispatched once the display is open, before the first tick.
    Initialize,
    /// Dispatched while finishing, before the display is released.
    Finalize,
    /// A key press resolved through the game's binding table.
    Action(A),
}

impl<A> GameEvent<A> {
    pub fn action(&self) -> Option<&A> {
        match self {
            GameEvent::Action(action) => Some(action),
            _ => None,
        }
    }
}

/// Handle to the loop passed to handlers.
///
/// Handlers run inside a tick, so finishing is deferred: a request is
/// honored once the current tick (or launch) completes.
#[derive(Debug, Default)]
pub struct LoopControl {
    finish: Option<bool>,
}

impl LoopControl {
    /// Ask the loop to finish, optionally terminating the process afterwards.
    ///
    /// Repeated requests keep the strongest one: any request to exit wins.
    pub fn request_finish(&mut self, exit_process: bool) {
        self.finish = Some(self.finish.unwrap_or(false) || exit_process);
    }

    pub fn finish_requested(&self) -> bool {
        self.finish.is_some()
    }

    pub(crate) fn take_finish(&mut self) -> Option<bool> {
        self.finish.take()
    }
}

/// Receives every [`GameEvent`] in dispatch order.
pub trait Handler<A> {
    fn handle(&mut self, control: &mut LoopControl, event: &GameEvent<A>);
}

impl<A, F> Handler<A> for F
where
    F: FnMut(&mut LoopControl, &GameEvent<A>),
{
    fn handle(&mut self, control: &mut LoopControl, event: &GameEvent<A>) {
        self(control, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_request_is_sticky() {
        let mut control = LoopControl::default();
        control.request_finish(true);
        control.request_finish(false);
        assert_eq!(control.take_finish(), Some(true));
        assert!(!control.finish_requested());
    }

    #[test]
    fn test_closures_are_handlers() {
        let mut seen = Vec::new();
        let mut handler = |control: &mut LoopControl, event: &GameEvent<char>| {
            if let Some(c) = event.action() {
                seen.push(*c);
            }
            if event == &GameEvent::Action('q') {
                control.request_finish(false);
            }
        };
        let mut control = LoopControl::default();
        handler.handle(&mut control, &GameEvent::Action('a'));
        handler.handle(&mut control, &GameEvent::Initialize);
        handler.handle(&mut control, &GameEvent::Action('q'));
        assert!(control.finish_requested());
        assert_eq!(seen, vec!['a', 'q']);
    }
}
