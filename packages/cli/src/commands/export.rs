use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{InstanceStore, Layout, Pipeline, Registry};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Layout document to export (JSON)
    pub layout: PathBuf,

    /// Target artifact (html, css, js, all, standalone)
    #[arg(short, long, default_value = "all")]
    pub target: String,

    /// Output directory
    #[arg(short, long, default_value = "./dist")]
    pub out_dir: PathBuf,

    /// Print to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Page title for standalone documents
    #[arg(long, default_value = "Pagecraft Page")]
    pub title: String,
}

pub fn export(args: ExportArgs) -> Result<()> {
    let source = fs::read_to_string(&args.layout)
        .with_context(|| format!("cannot read layout: {}", args.layout.display()))?;
    let layout: Layout = serde_json::from_str(&source)
        .with_context(|| format!("invalid layout document: {}", args.layout.display()))?;

    let registry = Registry::with_builtins();
    let mut store = InstanceStore::new(&layout.canvas_id);
    store.replace_from_layout(layout);

    println!(
        "{}",
        format!("🔨 Compiling {} blocks...", store.len()).bright_blue().bold()
    );

    let mut pipeline = Pipeline::new();
    let bundle = pipeline.compile(&registry, &store).clone();

    for warning in &bundle.warnings {
        println!("  {} {}", "⚠".yellow(), warning.to_string().yellow());
    }

    let artifacts: Vec<(&str, String)> = match args.target.as_str() {
        "html" => vec![("index.html", bundle.markup.clone())],
        "css" => vec![("styles.css", bundle.stylesheet.clone())],
        "js" => vec![("main.js", bundle.script.clone())],
        "all" => vec![
            (
                "index.html",
                pagecraft_compiler_html::compile_linked(
                    &args.title,
                    &bundle.markup,
                    "styles.css",
                    "main.js",
                ),
            ),
            ("styles.css", bundle.stylesheet.clone()),
            ("main.js", bundle.script.clone()),
        ],
        "standalone" => vec![("index.html", bundle.standalone(&args.title))],
        other => {
            return Err(anyhow!(
                "invalid target: {}. Use: html, css, js, all, or standalone",
                other
            ));
        }
    };

    if args.stdout {
        for (_, content) in &artifacts {
            println!("{content}");
        }
        return Ok(());
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("cannot create output dir: {}", args.out_dir.display()))?;

    for (name, content) in &artifacts {
        let path = args.out_dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;
        println!("  {} {}", "✓".green(), path.display());
    }

    println!();
    if bundle.warnings.is_empty() {
        println!(
            "{} Exported {} artifacts",
            "✅".green(),
            artifacts.len()
        );
    } else {
        println!(
            "{} Exported {} artifacts, {} warnings",
            "⚠️".yellow(),
            artifacts.len(),
            bundle.warnings.len()
        );
    }

    Ok(())
}
