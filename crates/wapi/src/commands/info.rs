//! Info command - shows server metadata.

use anyhow::Result;
use clap::Args;

use super::{Context, print_field, print_heading, print_json};

/// Arguments for the info command.
#[derive(Args, Debug)]
pub struct InfoArgs {}

/// Run the info command.
pub async fn run(_args: InfoArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let info = client.server().get_info().await?;

    if ctx.json_output {
        return print_json(&info);
    }

    print_heading("Server Information");
    print_field("Server", format!("{} v{}", info.name, info.version));
    print_field("Description", &info.description);
    if let Some(engine) = &info.whatsapp_engine_url {
        print_field("Engine", engine);
    }
    if let Some(caps) = &info.capabilities {
        print_field("Tools", caps.tools.join(", "));
        print_field("Resources", caps.resources.join(", "));
    }
    if ctx.verbose {
        print_field("Endpoint", &ctx.server_url);
    }
    println!();

    Ok(())
}
