//! Conversations command - lists recent conversations.

use anyhow::Result;
use clap::Args;
use wapi_client::{Conversation, ConversationsPayload};

use super::{Context, print_field, print_heading, print_json};

/// Arguments for the conversations command.
#[derive(Args, Debug)]
pub struct ConversationsArgs {
    /// Number of conversations to fetch (the server allows at most 50)
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Run the conversations command.
pub async fn run(args: ConversationsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let result: ConversationsPayload = client
        .whatsapp()
        .get_conversations(args.limit)
        .await?
        .decode()?;

    if ctx.json_output {
        return print_json(&result);
    }

    print_heading("Recent Conversations");
    print_field("Success", result.success);
    print_field("Conversations count", result.count);
    for conv in &result.conversations {
        print_conversation(conv);
    }
    println!();

    Ok(())
}

/// Print one conversation as `- name (number): last message`.
pub fn print_conversation(conv: &Conversation) {
    println!(
        "  - {} ({}): {}",
        conv.name,
        conv.number,
        conv.last_message.as_deref().unwrap_or("No messages")
    );
}
