//! Messages command - shows recent messages with a number.

use anyhow::Result;
use clap::Args;
use console::Style;
use wapi_client::{ChatMessage, MessagesPayload};

use super::{Context, print_field, print_heading, print_json};

/// Arguments for the messages command.
#[derive(Args, Debug)]
pub struct MessagesArgs {
    /// Phone number in international format (e.g. +1234567890)
    pub number: String,

    /// Number of messages to fetch (the server allows at most 50)
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Run the messages command.
pub async fn run(args: MessagesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let result: MessagesPayload = client
        .whatsapp()
        .get_messages(&args.number, args.limit)
        .await?
        .decode()?;

    if ctx.json_output {
        return print_json(&result);
    }

    print_heading(&format!("Messages with {}", args.number));
    print_field("Success", result.success);
    print_field("Messages count", result.count);
    if let Some(message) = result.message.as_deref().filter(|_| !result.success) {
        print_field("Message", message);
    }
    println!();
    for msg in &result.messages {
        print_message(msg);
    }
    if !result.messages.is_empty() {
        println!();
    }

    Ok(())
}

/// Print one message as `[sender]: text`.
pub fn print_message(msg: &ChatMessage) {
    let sender = if msg.from_me {
        Style::new().cyan().apply_to("You".to_string())
    } else {
        Style::new().bold().apply_to(msg.from.clone())
    };
    println!("  [{}]: {}", sender, msg.message);
}
