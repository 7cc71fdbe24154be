use std::path::Path;

use anyhow::{Context, Result};
use cg_core::ToolConfig;
use clap::Parser;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let config = resolve_config(&cli.config)?;

    // 4. Exécuter la commande
    match cli.command {
        cli::Command::Extract { verify_bitmaps } => {
            let written = pipeline::run_extract(&config, verify_bitmaps)?;
            println!(
                "{} fichiers écrits dans {}",
                written.len(),
                config.output_dir.display()
            );
        }
        cli::Command::Charmap => {
            let map = pipeline::run_charmap(&config)?;
            print!("{}", pipeline::coverage_summary(&map));
        }
        cli::Command::Encode {
            rom,
            policy,
            substitutes,
            output,
            text,
        } => {
            let custom = cli::parse_substitutes(&substitutes)?;
            let encoding = pipeline::run_encode(&config, rom, policy, custom, &text)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &encoding.bytes)
                        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
                    log::info!("Written: {}", path.display());
                }
                None => println!("{}", pipeline::hex_bytes(&encoding.bytes)),
            }
        }
    }

    Ok(())
}

/// Resolve config: `--config` if it exists, defaults otherwise.
fn resolve_config(path: &Path) -> Result<ToolConfig> {
    if path.exists() {
        cg_core::config::load_config(path)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(ToolConfig::default())
    }
}
