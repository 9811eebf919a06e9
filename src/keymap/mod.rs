//! Keymap configuration module
//!
//! Provides customizable keyboard shortcuts with preset keymaps (standard, vim).

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{parse_key_string, KeyBinding};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    /// Base preset keymap
    #[serde(default)]
    pub preset: KeymapPreset,

    /// User-defined overrides (checked before preset)
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Get the action for a key event, checking overrides first then preset
    /// Note: If an action is overridden, preset bindings for that action are ignored
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    /// Like [`Keymap::get_action`], for when a text field has focus.
    ///
    /// Plain characters belong to the field, and only form and global
    /// actions are available.
    pub fn get_text_entry_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let typed = matches!(code, KeyCode::Char(_))
            && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if typed {
            return None;
        }

        self.get_action(code, modifiers).filter(|action| {
            action.is_global()
                || matches!(
                    action,
                    Action::Confirm | Action::Cancel | Action::NextField | Action::PrevField
                )
        })
    }

    /// Get all bindings (overrides + preset) for display in help
    /// Overrides shadow preset bindings for the same action
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        for preset_binding in self.preset.bindings() {
            let is_overridden = self
                .overrides
                .iter()
                .any(|o| o.action == preset_binding.action);
            if !is_overridden {
                bindings.push(preset_binding);
            }
        }
        bindings
    }

    /// Get the display string for a specific action (e.g., Action::Scan -> "S")
    /// Checks overrides first, then preset.
    pub fn get_key_display_for_action(&self, action: Action) -> String {
        self.all_bindings()
            .into_iter()
            .find(|b| b.action == action)
            .map(|b| b.display())
            .unwrap_or_else(|| format!("{:?}", action))
    }

    /// Get the display string for navigation keys (up/down)
    pub fn navigation_display(&self) -> String {
        format!(
            "{}/{}",
            self.get_key_display_for_action(Action::MoveUp),
            self.get_key_display_for_action(Action::MoveDown)
        )
    }

    /// Footer text with the global shortcuts
    pub fn footer_global(&self) -> String {
        format!(
            "{}: Scan | {}: Settings | {}: Help | {}: Quit",
            self.get_key_display_for_action(Action::Scan),
            self.get_key_display_for_action(Action::ToggleSettings),
            self.get_key_display_for_action(Action::Help),
            self.get_key_display_for_action(Action::Quit),
        )
    }

    /// Footer text for pages with a form
    pub fn footer_form(&self) -> String {
        format!(
            "{}: Submit | {}: Next field | {}: Cancel",
            self.get_key_display_for_action(Action::Confirm),
            self.get_key_display_for_action(Action::NextField),
            self.get_key_display_for_action(Action::Cancel),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.preset, KeymapPreset::Standard);
        assert!(keymap.overrides.is_empty());
    }

    #[test]
    fn test_get_action_from_preset() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.get_action(KeyCode::Char('s'), KeyModifiers::NONE),
            Some(Action::Scan)
        );
        assert_eq!(
            keymap.get_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_override_takes_precedence() {
        let keymap = Keymap {
            preset: KeymapPreset::Standard,
            overrides: vec![KeyBinding::new("q", Action::Help)],
        };
        assert_eq!(
            keymap.get_action(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Help)
        );
    }

    #[test]
    fn test_text_entry_keeps_characters() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.get_text_entry_action(KeyCode::Char('s'), KeyModifiers::NONE),
            None
        );
        assert_eq!(
            keymap.get_text_entry_action(KeyCode::Char('S'), KeyModifiers::SHIFT),
            None
        );
        assert_eq!(
            keymap.get_text_entry_action(KeyCode::Char('s'), KeyModifiers::CONTROL),
            Some(Action::Scan)
        );
        assert_eq!(
            keymap.get_text_entry_action(KeyCode::Enter, KeyModifiers::NONE),
            Some(Action::Confirm)
        );
        // Arrow keys move the cursor instead
        assert_eq!(
            keymap.get_text_entry_action(KeyCode::Up, KeyModifiers::NONE),
            None
        );
    }

    #[test]
    fn test_footer_reflects_overrides() {
        let keymap = Keymap {
            preset: KeymapPreset::Standard,
            overrides: vec![KeyBinding::new("f2", Action::Scan)],
        };
        assert!(keymap.footer_global().starts_with("F2: Scan"));
    }
}
