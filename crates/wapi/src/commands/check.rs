//! Check command - looks up whether a number is on WhatsApp.

use anyhow::Result;
use clap::Args;
use wapi_client::CheckNumberPayload;

use super::{Context, mark, print_field, print_heading, print_json};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Phone number in international format (e.g. +1234567890)
    pub number: String,
}

/// Run the check command.
pub async fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let result: CheckNumberPayload = client.whatsapp().check_number(&args.number).await?.decode()?;

    if ctx.json_output {
        return print_json(&result);
    }

    print_heading(&format!("Checking Number: {}", args.number));
    print_field("Number exists", format!("{} {}", mark(result.exists), result.exists));
    print_field("Message", &result.message);
    println!();

    Ok(())
}
