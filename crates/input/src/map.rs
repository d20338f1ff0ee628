//! Key mapping from terminal events to domain events.

use std::collections::{BTreeMap, HashMap};

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::keys::KeyStroke;
use crate::BindingError;

/// Action names an application accepts in binding files.
///
/// Binding files refer to actions by name only; the application decides
/// which concrete value each name stands for.
#[derive(Debug, Clone)]
pub struct ActionRegistry<A> {
    actions: HashMap<String, A>,
}

impl<A> Default for ActionRegistry<A> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }
}

impl<A> ActionRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, name: impl Into<String>, action: A) -> Self {
        self.actions.insert(name.into(), action);
        self
    }

    pub fn get(&self, name: &str) -> Option<&A> {
        self.actions.get(name)
    }
}

/// Maps key strokes to domain events.
#[derive(Debug, Clone)]
pub struct ActionBinding<A> {
    actions: HashMap<KeyStroke, A>,
}

impl<A> Default for ActionBinding<A> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }
}

impl<A: Clone> ActionBinding<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(mut self, key: impl Into<KeyStroke>, action: A) -> Self {
        self.insert(key, action);
        self
    }

    pub fn insert(&mut self, key: impl Into<KeyStroke>, action: A) {
        self.actions.insert(key.into(), action);
    }

    /// Map a key event to its domain event. Unbound keys yield `None`.
    pub fn resolve(&self, key: &KeyEvent) -> Option<A> {
        self.actions.get(&KeyStroke::from(*key)).cloned()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Build a binding from a JSON object of `"<key>": "<action name>"` pairs.
    ///
    /// ```
    /// use crossterm::event::{KeyCode, KeyEvent};
    /// use tui_sprite_input::{ActionBinding, ActionRegistry};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// enum Action { Quit, Jump }
    ///
    /// let registry = ActionRegistry::new()
    ///     .register("quit", Action::Quit)
    ///     .register("jump", Action::Jump);
    /// let binding = ActionBinding::from_json(r#"{"<Esc>": "quit", " ": "jump"}"#, &registry).unwrap();
    ///
    /// assert_eq!(binding.resolve(&KeyEvent::from(KeyCode::Esc)), Some(Action::Quit));
    /// assert_eq!(binding.resolve(&KeyEvent::from(KeyCode::Char('x'))), None);
    /// ```
    pub fn from_json(json: &str, registry: &ActionRegistry<A>) -> Result<Self, BindingError> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut binding = Self::new();
        for (key, name) in entries {
            let stroke = KeyStroke::parse(&key)?;
            let action = registry
                .get(&name)
                .cloned()
                .ok_or_else(|| BindingError::UnknownAction {
                    key: key.clone(),
                    action: name.clone(),
                })?;
            binding.insert(stroke, action);
        }
        debug!(bindings = binding.len(), "loaded key bindings");
        Ok(binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        Quit,
        Left,
    }

    #[test]
    fn test_resolves_bound_keys_only() {
        let binding = ActionBinding::new()
            .bind(KeyCode::Esc, Action::Quit)
            .bind(KeyCode::Left, Action::Left);
        assert_eq!(
            binding.resolve(&KeyEvent::from(KeyCode::Esc)),
            Some(Action::Quit)
        );
        assert_eq!(
            binding.resolve(&KeyEvent::from(KeyCode::Left)),
            Some(Action::Left)
        );
        assert_eq!(binding.resolve(&KeyEvent::from(KeyCode::Right)), None);
    }

    #[test]
    fn test_modifiers_distinguish_bindings() {
        let binding = ActionBinding::new().bind(
            KeyStroke::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            Action::Quit,
        );
        assert_eq!(binding.resolve(&KeyEvent::from(KeyCode::Char('q'))), None);
        assert_eq!(
            binding.resolve(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_event_kind_does_not_matter_for_lookup() {
        let binding = ActionBinding::new().bind(KeyCode::Esc, Action::Quit);
        let release = KeyEvent::new_with_kind(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(binding.resolve(&release), Some(Action::Quit));
    }

    #[test]
    fn test_later_bind_replaces_earlier() {
        let binding = ActionBinding::new()
            .bind(KeyCode::Esc, Action::Quit)
            .bind(KeyCode::Esc, Action::Left);
        assert_eq!(binding.len(), 1);
        assert_eq!(
            binding.resolve(&KeyEvent::from(KeyCode::Esc)),
            Some(Action::Left)
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_names() {
        let registry = ActionRegistry::new().register("quit", Action::Quit);
        let err = ActionBinding::from_json(r#"{"<Esc>": "fly"}"#, &registry).unwrap_err();
        assert!(matches!(err, BindingError::UnknownAction { .. }));

        let err = ActionBinding::from_json(r#"{"<Hyper>": "quit"}"#, &registry).unwrap_err();
        assert!(matches!(err, BindingError::UnknownKey(_)));

        let err = ActionBinding::from_json("[1, 2]", &registry).unwrap_err();
        assert!(matches!(err, BindingError::Json(_)));
    }
}
