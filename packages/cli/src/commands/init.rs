use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::Layout;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Canvas id for the new layout
    pub canvas_id: String,

    /// Where to write the layout document
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn init(args: InitArgs) -> Result<()> {
    let mut layout = Layout::empty(&args.canvas_id);
    // The compiler never reads the clock; timestamps are stamped here at
    // the boundary.
    layout.saved_at = chrono::Utc::now().timestamp_millis();

    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", args.canvas_id)));

    let json = serde_json::to_string_pretty(&layout)?;
    fs::write(&path, json).with_context(|| format!("cannot write {}", path.display()))?;

    println!(
        "{} Created empty layout {}",
        "✓".green(),
        path.display().to_string().bold()
    );

    Ok(())
}
