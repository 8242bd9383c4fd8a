//! Resources command - lists and reads server resources.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use super::{Context, print_heading, print_json};

/// Arguments for the resources command.
#[derive(Args, Debug)]
pub struct ResourcesArgs {
    #[command(subcommand)]
    pub command: Option<ResourcesCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ResourcesCommand {
    /// List available resources (default)
    List,

    /// Read a resource and print its document
    Read {
        /// Resource URI (e.g. whatsapp://connection-status)
        uri: String,
    },
}

/// Run the resources command.
pub async fn run(args: ResourcesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command.unwrap_or(ResourcesCommand::List) {
        ResourcesCommand::List => {
            let listing = client.resources().list().await?;
            if ctx.json_output {
                return print_json(&listing);
            }

            let bold = Style::new().bold();
            let dim = Style::new().dim();
            print_heading("Resources");
            for resource in &listing.resources {
                println!(
                    "  - {} {}",
                    bold.apply_to(&resource.uri),
                    dim.apply_to(&resource.mime_type)
                );
                println!("    {}: {}", resource.name, resource.description);
            }
            println!();
        }
        ResourcesCommand::Read { uri } => {
            let response = client.resources().read(&uri).await?;
            let document: serde_json::Value = response.decode()?;
            // The document is already structured data; print it the same way in both modes
            print_json(&document)?;
        }
    }

    Ok(())
}
