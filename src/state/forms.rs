//! Form state of the pages that take user input.

use crate::utils::TextInput;

/// Name input of the new-product page. The barcode is not editable.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: TextInput,
}

/// Comment text of the add-comment page
#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    pub text: TextInput,
}

/// Fields of the settings page, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    Username,
    ServerUrl,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub username: TextInput,
    pub server_url: TextInput,
    pub focus: SettingsField,
}

impl SettingsForm {
    /// Refill the form and focus its first field
    pub fn load(&mut self, username: &str, server_url: &str) {
        self.username.set_text(username);
        self.server_url.set_text(server_url);
        self.focus = SettingsField::Username;
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focus {
            SettingsField::Username => &mut self.username,
            SettingsField::ServerUrl => &mut self.server_url,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            SettingsField::Username => SettingsField::ServerUrl,
            SettingsField::ServerUrl => SettingsField::Username,
        };
    }

    /// Two fields, so going back is going forward
    pub fn prev_field(&mut self) {
        self.next_field();
    }
}
