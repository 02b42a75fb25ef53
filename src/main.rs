use anyhow::{Context, Result};
use clap::Parser;

use keyremap::cli::CliArgs;
use keyremap::config::{load_remap_file, RemapConfig};
use keyremap::editor::ScratchEditor;
use keyremap::session::Session;

fn main() -> Result<()> {
    keyremap::tracing::init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => load_remap_file(path)
            .with_context(|| format!("Failed to load remap config {}", path.display()))?,
        None => RemapConfig::load(),
    };
    for rejected in config.rejected() {
        eprintln!("warning: {}: {}", rejected.scope, rejected.error);
    }

    let mut editor = ScratchEditor::with_text(&args.text);
    editor.set_mode(args.mode);

    let mut session = Session::with_editor(&config, editor);
    let keys = args.keys();
    let consumed = session
        .handle_keys(&keys)
        .context("Failed to replay keys")?;

    println!("mode: {}", session.mode());
    println!("remapped: {}", consumed);
    println!("text: {:?}", session.editor().text());

    Ok(())
}
