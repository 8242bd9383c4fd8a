//! Status command - shows the WhatsApp connection status.

use anyhow::Result;
use clap::Args;
use console::Style;
use wapi_client::StatusPayload;

use super::{Context, print_field, print_heading, print_json};

/// Arguments for the status command.
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Run the status command.
pub async fn run(_args: StatusArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let status: StatusPayload = client.whatsapp().get_status().await?.decode()?;

    if ctx.json_output {
        return print_json(&status);
    }

    let indicator = match status.status.as_str() {
        "connected" => Style::new().green().apply_to(format!("● {}", status.status)),
        "qr" => Style::new().yellow().apply_to(format!("● {}", status.status)),
        _ => Style::new().red().apply_to(format!("● {}", status.status)),
    };

    print_heading("Connection Status");
    print_field("Status", indicator);
    print_field("Message", &status.message);
    if status.has_qr {
        print_field("QR", "waiting to be scanned");
    }
    if ctx.verbose {
        print_field("Server", &ctx.server_url);
    }
    println!();

    Ok(())
}
