use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use cg_core::RomVariant;
use cg_fallback::UnmappedPolicy;
use clap::{Parser, Subcommand};

/// cgrom: US2066 character-generator ROM maps and Baltic fallbacks.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extraire les tables A/B/C et écrire les fichiers par ROM.
    Extract {
        /// Afficher le raster de chaque correspondance manuelle.
        #[arg(long, default_value_t = false)]
        verify_bitmaps: bool,
    },
    /// Calculer la couverture de l'alphabet cible et les substituts.
    Charmap,
    /// Encoder un texte en octets d'une ROM.
    Encode {
        /// Variante de ROM : A, B ou C.
        #[arg(long, default_value = "A")]
        rom: RomVariant,

        /// Caractères absents : auto, replace, keep.
        #[arg(long, default_value = "auto")]
        policy: UnmappedPolicy,

        /// Substitution manuelle `source=cible`, répétable.
        #[arg(long = "substitute", value_name = "FROM=TO")]
        substitutes: Vec<String>,

        /// Écrire les octets bruts dans ce fichier au lieu de stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Texte à encoder.
        text: String,
    },
}

/// Parse `--substitute` pairs into a substitution table.
///
/// # Errors
/// Returns an error if a pair is not two single characters around `=`.
pub fn parse_substitutes(pairs: &[String]) -> Result<BTreeMap<char, char>> {
    pairs
        .iter()
        .map(|pair| {
            let mut chars = pair.chars();
            match (chars.next(), chars.next(), chars.next(), chars.next()) {
                (Some(from), Some('='), Some(to), None) => Ok((from, to)),
                _ => anyhow::bail!("Substitution invalide : {pair:?} (attendu : x=y)"),
            }
        })
        .collect()
}
