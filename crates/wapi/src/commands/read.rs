//! Read command - marks messages from a number as read.

use anyhow::{Result, bail};
use clap::Args;
use wapi_client::MarkReadPayload;

use super::{Context, mark, print_json};

/// Arguments for the read command.
#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Phone number in international format (e.g. +1234567890)
    pub number: String,
}

/// Run the read command.
pub async fn run(args: ReadArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let result: MarkReadPayload = client.whatsapp().mark_as_read(&args.number).await?.decode()?;

    if ctx.json_output {
        print_json(&result)?;
    } else {
        println!("{} {}", mark(result.success), result.message);
    }

    if !result.success {
        bail!("could not mark messages from {} as read", args.number);
    }
    Ok(())
}
