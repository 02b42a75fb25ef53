//! Command-line argument parsing for the keyremap player
//!
//! Plays a sequence of keys through a scratch editor with remapping applied
//! and reports where the editor ended up.

use std::path::PathBuf;

use clap::Parser;

use crate::remap::{Key, Mode};

/// Replay key sequences through the remapper
#[derive(Parser, Debug)]
#[command(name = "keyremap", version, about = "Replay keys through configured remaps")]
pub struct CliArgs {
    /// Keys to send, one token per argument (e.g. `i a j j`)
    #[arg(value_name = "KEYS")]
    pub keys: Vec<String>,

    /// Remap config file (defaults to ~/.config/keyremap/remap.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mode the editor starts in
    #[arg(short, long, default_value = "normal", value_parser = parse_mode)]
    pub mode: Mode,

    /// Initial buffer text
    #[arg(short, long, default_value = "")]
    pub text: String,
}

impl CliArgs {
    pub fn keys(&self) -> Vec<Key> {
        self.keys.iter().map(|k| Key::from(k.as_str())).collect()
    }
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse()
}
