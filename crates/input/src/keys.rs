//! Key strokes: the hashable part of a terminal key event.
//!
//! Key strings use a small bracket notation:
//!
//! | Text | Meaning |
//! |------|---------|
//! | `a`, `%` | that character |
//! | `<Escape>`, `<F5>`, `<PageUp>` | a named key |
//! | `<c-q>` | Ctrl+q |
//! | `<a-x>` | Alt+x |
//! | `<s-Tab>` | Shift+Tab |
//!
//! Names are case-insensitive; modifier prefixes can be combined (`<c-a-x>`).

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::BindingError;

/// A key code plus modifiers, normalized so it can key a binding table.
///
/// Shift is dropped for character keys, since the character already carries
/// the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyStroke {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let modifiers = match code {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        Self { code, modifiers }
    }

    pub fn code(&self) -> KeyCode {
        self.code
    }

    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Parse the bracket notation described in the module docs.
    pub fn parse(s: &str) -> Result<Self, BindingError> {
        let unknown = || BindingError::UnknownKey(s.to_string());

        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let inner = s
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or(s);
        if inner.is_empty() {
            return Err(unknown());
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut name = inner;
        // A prefix only counts when something follows it: `<c->` is not Ctrl+nothing.
        while name.len() > 2 {
            let modifier = match name.get(..2) {
                Some("c-" | "C-") => KeyModifiers::CONTROL,
                Some("a-" | "A-") => KeyModifiers::ALT,
                Some("s-" | "S-") => KeyModifiers::SHIFT,
                _ => break,
            };
            modifiers |= modifier;
            name = &name[2..];
        }

        let code = key_code_from_name(name).ok_or_else(unknown)?;
        Ok(Self::new(code, modifiers))
    }
}

impl From<KeyEvent> for KeyStroke {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

impl From<KeyCode> for KeyStroke {
    fn from(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }
}

impl FromStr for KeyStroke {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "c-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "a-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "s-")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space")?,
            KeyCode::Char(c) => write!(f, "{}", c)?,
            KeyCode::F(n) => write!(f, "F{}", n)?,
            other => write!(f, "{:?}", other)?,
        }
        write!(f, ">")
    }
}

fn key_code_from_name(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" | "reversetab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "left" | "arrowleft" => KeyCode::Left,
        "right" | "arrowright" => KeyCode::Right,
        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        _ => {
            let n = lower.strip_prefix('f')?.parse::<u8>().ok()?;
            if (1..=24).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(code)
}
