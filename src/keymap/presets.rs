//! Preset keymaps: Standard and Vim
//!
//! Each preset provides a complete set of key bindings for all actions.
//! Global actions always have a Ctrl variant so they work while a text
//! field has focus.

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

/// Available keymap presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Standard keyboard navigation (arrows, Enter, Esc)
    #[default]
    Standard,
    /// Vim-style navigation (jk)
    Vim,
}

impl KeymapPreset {
    /// Get all key bindings for this preset
    pub fn bindings(&self) -> Vec<KeyBinding> {
        match self {
            KeymapPreset::Standard => standard_bindings(),
            KeymapPreset::Vim => vim_bindings(),
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
        }
    }
}

fn common_bindings() -> Vec<KeyBinding> {
    vec![
        // Forms
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("tab", Action::NextField),
        KeyBinding::new("shift+tab", Action::PrevField),
        KeyBinding::new("backtab", Action::PrevField),
        // Global
        KeyBinding::new("s", Action::Scan),
        KeyBinding::new("ctrl+s", Action::Scan),
        KeyBinding::new("o", Action::ToggleSettings),
        KeyBinding::new("ctrl+o", Action::ToggleSettings),
        KeyBinding::new("q", Action::Quit),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("?", Action::Help),
        KeyBinding::new("f1", Action::Help),
        // Product page
        KeyBinding::new("c", Action::AddComment),
    ]
}

/// Standard keyboard bindings (arrows, Enter, Esc)
fn standard_bindings() -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
    ];
    bindings.extend(common_bindings());
    bindings
}

/// Vim-style keyboard bindings (jk navigation)
fn vim_bindings() -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding::new("k", Action::MoveUp),
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("j", Action::MoveDown),
        KeyBinding::new("down", Action::MoveDown),
    ];
    bindings.extend(common_bindings());
    bindings.push(KeyBinding::new("ctrl+n", Action::NextField));
    bindings.push(KeyBinding::new("ctrl+p", Action::PrevField));
    bindings
}
