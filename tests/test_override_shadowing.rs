use barcode_agent::keymap::{Action, KeyBinding, Keymap, KeymapPreset};
use crossterm::event::{KeyCode, KeyModifiers};

#[test]
fn test_override_shadows_preset_binding() {
    let keymap = Keymap {
        preset: KeymapPreset::Vim,
        overrides: vec![KeyBinding::new("w", Action::MoveUp)],
    };

    assert_eq!(
        keymap.get_action(KeyCode::Char('w'), KeyModifiers::NONE),
        Some(Action::MoveUp)
    );
    // Both preset keys for move_up are shadowed
    assert_eq!(
        keymap.get_action(KeyCode::Char('k'), KeyModifiers::NONE),
        None
    );
    assert_eq!(keymap.get_action(KeyCode::Up, KeyModifiers::NONE), None);

    assert_eq!(
        keymap.get_action(KeyCode::Char('j'), KeyModifiers::NONE),
        Some(Action::MoveDown)
    );
}

#[test]
fn test_display_reflects_overrides() {
    let keymap = Keymap {
        preset: KeymapPreset::Vim,
        overrides: vec![
            KeyBinding::new("w", Action::MoveUp),
            KeyBinding::new("x", Action::Quit),
        ],
    };

    assert_eq!(keymap.navigation_display(), "W/J");
    assert_eq!(keymap.get_key_display_for_action(Action::Quit), "X");
    assert!(keymap.footer_global().ends_with("X: Quit"));
}

#[test]
fn test_override_is_listed_once() {
    let keymap = Keymap {
        preset: KeymapPreset::Standard,
        overrides: vec![KeyBinding::new("ctrl+b", Action::Scan)],
    };

    let scan_keys: Vec<String> = keymap
        .all_bindings()
        .into_iter()
        .filter(|b| b.action == Action::Scan)
        .map(|b| b.key)
        .collect();
    assert_eq!(scan_keys, vec!["ctrl+b".to_string()]);
}

#[test]
fn test_text_entry_uses_override() {
    let keymap = Keymap {
        preset: KeymapPreset::Standard,
        overrides: vec![KeyBinding::new("ctrl+b", Action::Scan)],
    };

    assert_eq!(
        keymap.get_text_entry_action(KeyCode::Char('b'), KeyModifiers::CONTROL),
        Some(Action::Scan)
    );
    assert_eq!(
        keymap.get_text_entry_action(KeyCode::Char('s'), KeyModifiers::CONTROL),
        None
    );
}
