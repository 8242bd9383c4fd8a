//! Tools command - lists the tools the server exposes.

use anyhow::Result;
use clap::Args;
use console::Style;

use super::{Context, print_heading, print_json};

/// Arguments for the tools command.
#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Also print each tool's input schema
    #[arg(long)]
    pub schema: bool,
}

/// Run the tools command.
pub async fn run(args: ToolsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let tools = client.server().list_tools().await?;

    if ctx.json_output {
        return print_json(&tools);
    }

    let bold = Style::new().bold();
    print_heading("Available Tools");
    if tools.tools.is_empty() {
        println!("  No tools advertised.");
    }
    for tool in &tools.tools {
        println!("  - {}: {}", bold.apply_to(&tool.name), tool.description);
        if args.schema && !tool.input_schema.is_null() {
            let schema = serde_json::to_string_pretty(&tool.input_schema)?;
            for line in schema.lines() {
                println!("      {}", line);
            }
        }
    }
    println!();

    Ok(())
}
