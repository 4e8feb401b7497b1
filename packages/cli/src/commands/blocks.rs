use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_blocks::Registry;

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// Show every property of each block type
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn blocks(args: BlocksArgs) -> Result<()> {
    let registry = Registry::with_builtins();

    println!("{}", "Available block types:".bright_blue().bold());
    println!();

    for block in registry.list() {
        println!(
            "  {} {} ({} properties)",
            block.name.bold(),
            format!("[{}]", block.type_name).dimmed(),
            block.schema.len()
        );

        if args.verbose {
            for def in block.schema.iter() {
                let mut line = format!("      {} {}", def.key, def.kind.as_str().dimmed());
                if let (Some(min), Some(max)) = (def.constraints.min, def.constraints.max) {
                    line.push_str(&format!(" [{min}..{max}]").dimmed().to_string());
                }
                if !def.constraints.options.is_empty() {
                    line.push_str(
                        &format!(" ({})", def.constraints.options.join(" | "))
                            .dimmed()
                            .to_string(),
                    );
                }
                println!("{line}");
            }
        }
    }

    Ok(())
}
