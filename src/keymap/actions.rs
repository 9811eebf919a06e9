//! Semantic actions that can be triggered by keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// All user actions of the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation ============
    /// Move up (scroll the comment list)
    MoveUp,
    /// Move down (scroll the comment list)
    MoveDown,

    // ============ Forms ============
    /// Submit the form on the current page (Enter)
    Confirm,
    /// Cancel / go back (Esc)
    Cancel,
    /// Move to next form field
    NextField,
    /// Move to previous form field
    PrevField,

    // ============ Global ============
    /// Quit the application
    Quit,
    /// Show help overlay
    Help,
    /// Start a barcode scan
    Scan,
    /// Show or hide the settings page
    ToggleSettings,

    // ============ Page-specific ============
    /// Write a comment for the product on screen
    AddComment,
}

impl Action {
    /// Get a human-readable description of this action
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::Confirm => "Submit",
            Action::Cancel => "Cancel / Go back",
            Action::NextField => "Next field",
            Action::PrevField => "Previous field",
            Action::Quit => "Quit",
            Action::Help => "Show help",
            Action::Scan => "Scan barcode",
            Action::ToggleSettings => "View / hide settings",
            Action::AddComment => "Add comment",
        }
    }

    /// Get action category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp | Action::MoveDown => "Navigation",
            Action::Confirm | Action::Cancel | Action::NextField | Action::PrevField => "Forms",
            Action::Quit | Action::Help | Action::Scan | Action::ToggleSettings => "Global",
            Action::AddComment => "Product",
        }
    }

    /// Actions that stay available while a text field has focus.
    ///
    /// Plain character keys are typed into the field instead of being
    /// looked up in the keymap.
    pub fn is_global(&self) -> bool {
        self.category() == "Global"
    }
}
