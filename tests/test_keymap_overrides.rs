use barcode_agent::config::{Config, ConfigStore};
use barcode_agent::keymap::{Action, KeyBinding, KeymapPreset};
use barcode_agent::settings::{KeyValueStore, SERVER_URL};
use crossterm::event::{KeyCode, KeyModifiers};
use indoc::indoc;
use tempfile::TempDir;

#[test]
fn test_keymap_overrides_persist() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Vim;
    config
        .keymap
        .overrides
        .push(KeyBinding::new("x", Action::Quit));
    config
        .keymap
        .overrides
        .push(KeyBinding::new("w", Action::MoveUp));
    config.save(&config_path).unwrap();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[keymap]"));
    assert!(content.contains("preset = \"vim\""));

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.keymap.preset, KeymapPreset::Vim);
    assert_eq!(loaded.keymap.overrides.len(), 2);

    // Overrides take precedence
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('x'), KeyModifiers::NONE),
        Some(Action::Quit)
    );
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('w'), KeyModifiers::NONE),
        Some(Action::MoveUp)
    );

    // Preset bindings of overridden actions are gone
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('q'), KeyModifiers::NONE),
        None
    );
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('k'), KeyModifiers::NONE),
        None
    );

    // Everything else still comes from the preset
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('j'), KeyModifiers::NONE),
        Some(Action::MoveDown)
    );
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('s'), KeyModifiers::NONE),
        Some(Action::Scan)
    );
}

#[test]
fn test_hand_written_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        indoc! {r#"
            theme = "light"

            [keymap]
            preset = "vim"

            [[keymap.overrides]]
            key = "f2"
            action = "scan"

            [settings]
            serverUrl = "http://localhost:8080"
        "#},
    )
    .unwrap();

    let store = ConfigStore::open(config_path).unwrap();
    let config = store.config();
    assert_eq!(config.theme, "light");
    assert_eq!(config.keymap.preset, KeymapPreset::Vim);
    assert_eq!(
        config.keymap.get_action(KeyCode::F(2), KeyModifiers::NONE),
        Some(Action::Scan)
    );
    assert_eq!(
        store.get_item(SERVER_URL).as_deref(),
        Some("http://localhost:8080")
    );
    assert_eq!(store.get_item("username"), None);
}

#[test]
fn test_setting_write_keeps_keymap() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Vim;
    config.save(&config_path).unwrap();

    let mut store = ConfigStore::open(config_path.clone()).unwrap();
    store.set_item("username", "alice").unwrap();

    let reloaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(reloaded.keymap.preset, KeymapPreset::Vim);
    assert_eq!(
        reloaded.settings.get("username").map(String::as_str),
        Some("alice")
    );
}
