//! Command-line interface.
//!
//! Without a subcommand the TUI is launched. The subcommands talk to the
//! same server as the TUI and share its settings.

mod common;
pub mod completions;

pub use common::*;

use crate::server::{
    Product, ServerConnection, BARCODE_LABELS, PRODUCT_LABELS, SUBMIT_COMMENT_LABELS,
    SUBMIT_PRODUCT_LABELS,
};
use crate::settings::{SERVER_URL, USERNAME};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing::info;

/// Look up products by barcode and share comments about them
#[derive(Parser, Debug)]
#[command(name = "barcode-agent", version, about = "Look up products by barcode and share comments about them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the products carrying a barcode
    Lookup {
        barcode: String,
        /// Print the server response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a product and its comments
    Product {
        id: String,
        /// Print the server response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a product for a barcode
    AddProduct { barcode: String, name: String },
    /// Comment on a product
    Comment {
        product_id: String,
        text: String,
        /// Author of the comment (defaults to the configured user name)
        #[arg(long)]
        by: Option<String>,
    },
    /// Read or change a setting
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Shows logs location
    Logs,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (detected when omitted)
        shell: Option<Shell>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the value of a setting (serverUrl, username)
    Get { key: String },
    /// Change a setting
    Set { key: String, value: String },
    /// Print the configuration file location
    Path,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Lookup { barcode, json }) => Self::cmd_lookup(&barcode, json),
            Some(Commands::Product { id, json }) => Self::cmd_product(&id, json),
            Some(Commands::AddProduct { barcode, name }) => Self::cmd_add_product(&barcode, &name),
            Some(Commands::Comment {
                product_id,
                text,
                by,
            }) => Self::cmd_comment(&product_id, &text, by),
            Some(Commands::Config { command }) => Self::cmd_config(command),
            Some(Commands::Logs) => Self::cmd_logs(),
            Some(Commands::Completions { shell }) => completions::generate(shell),
            None => {
                // No command provided, launch TUI
                Ok(())
            }
        }
    }

    fn cmd_lookup(barcode: &str, json: bool) -> Result<()> {
        info!("CLI: lookup {}", barcode);
        let mut ctx = CliContext::load()?;
        let server = ctx.server()?;

        let Some(list) = ctx.request(&BARCODE_LABELS, server.request_barcode_info(barcode))? else {
            return Ok(());
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&list)?);
            return Ok(());
        }
        if list.products.is_empty() {
            print_info(&format!("No products carry barcode {}", barcode));
        }
        for product in &list.products {
            print_product(product);
        }
        Ok(())
    }

    fn cmd_product(id: &str, json: bool) -> Result<()> {
        info!("CLI: product {}", id);
        let mut ctx = CliContext::load()?;
        let server = ctx.server()?;

        let Some(product) = ctx.request(&PRODUCT_LABELS, server.request_product_info(id))? else {
            return Ok(());
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&product)?);
        } else {
            print_product(&product);
        }
        Ok(())
    }

    fn cmd_add_product(barcode: &str, name: &str) -> Result<()> {
        info!("CLI: add product {} ({})", name, barcode);
        if barcode.trim().is_empty() || name.trim().is_empty() {
            bail!("Barcode and name must not be empty");
        }
        let mut ctx = CliContext::load()?;
        let server = ctx.server()?;

        if let Some(created) = ctx.request(
            &SUBMIT_PRODUCT_LABELS,
            server.submit_product(barcode.trim(), name.trim()),
        )? {
            print_success(&format!("Added {} with id {}", name.trim(), created.id));
        }
        Ok(())
    }

    fn cmd_comment(product_id: &str, text: &str, by: Option<String>) -> Result<()> {
        info!("CLI: comment on {}", product_id);
        if text.trim().is_empty() {
            bail!("Comment is empty");
        }
        let mut ctx = CliContext::load()?;
        let server = ctx.server()?;
        let by = by.unwrap_or_else(|| ctx.settings.username());

        if ctx
            .request(
                &SUBMIT_COMMENT_LABELS,
                server.submit_comment(product_id, &by, text.trim()),
            )?
            .is_some()
        {
            print_success(&format!("Comment by {} added to {}", by, product_id));
        }
        Ok(())
    }

    fn cmd_config(command: ConfigCommand) -> Result<()> {
        match command {
            ConfigCommand::Get { key } => {
                check_setting_key(&key)?;
                let ctx = CliContext::load()?;
                println!("{}", ctx.settings.get(&key));
            }
            ConfigCommand::Set { key, value } => {
                check_setting_key(&key)?;
                if key == SERVER_URL {
                    ServerConnection::new(&value)?;
                }
                let mut ctx = CliContext::load()?;
                ctx.settings
                    .set(&key, &value)
                    .with_context(|| format!("Failed to save {}", key))?;
                print_success(&format!("{} set to {}", key, value));
            }
            ConfigCommand::Path => {
                println!("{}", crate::utils::get_config_path().display());
            }
        }
        Ok(())
    }

    fn cmd_logs() -> Result<()> {
        let log_file = crate::utils::get_log_dir().join(crate::LOG_FILE_NAME);
        println!("{}", log_file.display());
        Ok(())
    }
}

fn check_setting_key(key: &str) -> Result<()> {
    if key == SERVER_URL || key == USERNAME {
        return Ok(());
    }
    bail!("Unknown setting {}; expected {} or {}", key, SERVER_URL, USERNAME)
}

fn print_product(product: &Product) {
    println!("{}\t{}", product.id(), product.name());
    for comment in product.comments() {
        match comment.date() {
            Some(date) => println!("  {} ({}): {}", comment.by(), date, comment.text()),
            None => println!("  {}: {}", comment.by(), comment.text()),
        }
    }
}
