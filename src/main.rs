use anyhow::Result;
use barcode_agent::app::App;
use barcode_agent::cli::{print_error, Cli};
use barcode_agent::styles::{init_theme, ThemeType};
use barcode_agent::utils::{get_config_path, get_log_dir};
use barcode_agent::{Config, LOG_FILE_NAME};
use clap::Parser;
use std::str::FromStr;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state before handling panic
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        // Call the original panic hook to show the panic message
        original_hook(panic_info);
    }));
}

/// Pick the theme: `--no-colors` and `NO_COLOR` win over the config file
fn init_theme_from_config(no_colors: bool) {
    let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    let theme_type = if no_colors || no_color_env {
        ThemeType::NoColor
    } else {
        Config::load_or_create(&get_config_path())
            .ok()
            .and_then(|config| ThemeType::from_str(&config.theme).ok())
            .unwrap_or(ThemeType::Dark)
    };
    init_theme(theme_type);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging directory
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join(LOG_FILE_NAME);

    // Initialize tracing with file logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    if cli.command.is_some() {
        let result = cli.execute();
        drop(guard);
        if let Err(err) = result {
            print_error(&format!("{:#}", err));
            std::process::exit(1);
        }
        return Ok(());
    }

    setup_panic_hook();
    init_theme_from_config(cli.no_colors);

    // Print log location before TUI starts (this will be visible briefly)
    eprintln!("Logs are being written to: {:?}", log_file);
    eprintln!("View logs in real-time: tail -f {:?}", log_file);

    let mut app = App::new()?;
    let result = app.run();

    // Restore terminal state on normal exit
    // (panic hook handles panics)
    drop(guard);

    result
}
