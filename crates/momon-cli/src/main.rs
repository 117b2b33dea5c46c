//! Momon CLI - create and browse monsters
//!
//! Talks to the Momon API as this machine's device.

mod api;
mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use api::{MomonClient, MonsterResponse};
use config::Config;

const MAX_TEXT_CHARS: usize = 100;

#[derive(Parser)]
#[command(name = "momon")]
#[command(about = "Momon CLI - turn a photo and a feeling into a monster", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a monster from a photo and today's feeling
    Create {
        /// Path to the photo
        image: PathBuf,
        /// How you feel today (at most 100 characters)
        text: String,
    },

    /// List your monsters, newest first
    List,

    /// Show a single monster
    Show {
        /// Monster ID
        id: i64,
    },

    /// Check the server
    Health,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Point the CLI at another server
    SetUrl {
        /// Base URL, e.g. http://localhost:8000
        url: String,
    },
    /// Forget this machine's device id and start a fresh collection
    ResetDevice,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Create { image, text } => cmd_create(image, text).await,
        Commands::List => cmd_list().await,
        Commands::Show { id } => cmd_show(id).await,
        Commands::Health => cmd_health().await,
        Commands::Config { action } => cmd_config(action),
    }
}

/// Load config and build a client, persisting a freshly generated device id
fn client() -> Result<MomonClient> {
    let mut config = Config::load()?;
    let (device_id, created) = config.ensure_device_id();
    if created {
        config.save()?;
        eprintln!("{} New device id: {}", "✓".green(), device_id.dimmed());
    }

    Ok(MomonClient::new(&config.base_url, &device_id))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_create(image: PathBuf, text: String) -> Result<()> {
    if !image.is_file() {
        bail!("Image not found: {:?}", image);
    }
    if text.trim().is_empty() {
        bail!("Feeling text must not be empty");
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        bail!("Feeling text must be at most {} characters", MAX_TEXT_CHARS);
    }

    let client = client()?;
    eprintln!("{}", "Summoning your monster...".dimmed());

    let monster = client.create_monster(&image, &text).await?;

    println!("{} Monster created!", "✓".green());
    print_monster(&monster);

    Ok(())
}

async fn cmd_list() -> Result<()> {
    let monsters = client()?.list_monsters().await?;

    if monsters.is_empty() {
        println!("No monsters yet.");
        println!("\n{}", "Create one with:".dimmed());
        println!("  momon create <IMAGE_PATH> \"<how you feel>\"");
        return Ok(());
    }

    println!("{}", "Monsters:".bold());
    for monster in &monsters {
        println!(
            "  {} {} {}",
            format!("#{}", monster.id).cyan(),
            monster.name.bold(),
            monster.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
        println!("      {}", truncate_string(&monster.description, 60).dimmed());
    }

    Ok(())
}

async fn cmd_show(id: i64) -> Result<()> {
    let monster = client()?.get_monster(id).await?;
    print_monster(&monster);
    Ok(())
}

async fn cmd_health() -> Result<()> {
    let config = Config::load()?;
    let client = MomonClient::new(&config.base_url, "");

    print!("Checking {}... ", config.base_url);
    match client.health().await {
        Ok(health) => {
            println!("{}", health.status.green());
            println!("  Version: {}", health.version);
            if let Some(backend) = health.backend {
                println!("  Backend: {}", backend.cyan());
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", "Failed".red());
            Err(e)
        }
    }
}

fn cmd_config(action: Option<ConfigAction>) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        Some(ConfigAction::SetUrl { url }) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("URL must start with http:// or https://");
            }
            config.set_base_url(&url);
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url);
        }
        Some(ConfigAction::ResetDevice) => {
            match config.reset_device() {
                Some(old) => println!("{} Forgot device id {}", "✓".green(), old.dimmed()),
                None => println!("No device id was stored."),
            }
            config.save()?;
        }
        None => {
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  Base URL: {}", config.base_url);
            println!(
                "  Device ID: {}",
                match &config.device_id {
                    Some(id) => id.cyan(),
                    None => "Not set (created on first request)".yellow(),
                }
            );
        }
    }

    Ok(())
}

fn print_monster(monster: &MonsterResponse) {
    println!("  {} {}", format!("#{}", monster.id).cyan(), monster.name.bold());
    println!("  {}", monster.description);
    println!("  Image: {}", monster.image_url.underline());
    println!(
        "  Created: {}",
        monster.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed()
    );
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_counts_chars() {
        assert_eq!(truncate_string("몬스터", 5), "몬스터");
        assert_eq!(truncate_string("몬스터몬스터", 3), "몬스터...");
    }

    #[test]
    fn test_cli_parses_create() {
        let cli = Cli::try_parse_from(["momon", "create", "cat.png", "설레요"]).unwrap();
        match cli.command {
            Commands::Create { image, text } => {
                assert_eq!(image, PathBuf::from("cat.png"));
                assert_eq!(text, "설레요");
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_cli_parses_config_actions() {
        let cli = Cli::try_parse_from(["momon", "config", "set-url", "http://x"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: Some(ConfigAction::SetUrl { .. })
            }
        ));

        let cli = Cli::try_parse_from(["momon", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { action: None }));
    }
}
