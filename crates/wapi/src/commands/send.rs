//! Send command - sends a text message.

use anyhow::{Result, bail};
use clap::Args;
use wapi_client::SendMessagePayload;

use super::{Context, mark, print_json};

/// Arguments for the send command.
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Phone number in international format (e.g. +1234567890)
    pub number: String,

    /// Message text
    pub message: String,
}

/// Run the send command.
pub async fn run(args: SendArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let result: SendMessagePayload = client
        .whatsapp()
        .send_message(&args.number, &args.message)
        .await?
        .decode()?;

    if ctx.json_output {
        print_json(&result)?;
    } else {
        println!("{} {}", mark(result.success), result.message);
    }

    if !result.success {
        bail!("message to {} was not sent", args.number);
    }
    Ok(())
}
