//! Demo command - a guided tour of the API.
//!
//! Runs the read-only calls in order and prints each result. Sending and
//! message history are opt-in because they touch a real chat.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use wapi_client::{
    CheckNumberPayload, ConversationsPayload, MessagesPayload, SendMessagePayload, StatusPayload,
};

use super::conversations::print_conversation;
use super::messages::print_message;
use super::{Context, mark, print_field, print_heading, print_json};

/// Conversations shown in the summary.
const SHOWN_CONVERSATIONS: usize = 3;

/// Messages shown from the end of the history.
const SHOWN_MESSAGES: usize = 5;

/// Arguments for the demo command.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Number used for the check (and for --messages/--send)
    #[arg(long, default_value = "+1234567890")]
    pub number: String,

    /// Also fetch recent messages with the number
    #[arg(long)]
    pub messages: bool,

    /// Also send this text to the number
    #[arg(long, value_name = "TEXT")]
    pub send: Option<String>,
}

/// Run the demo command.
///
/// Text output is printed section by section, so a failing step still leaves
/// the earlier results on screen.
pub async fn run(args: DemoArgs, ctx: &Context) -> Result<()> {
    if ctx.json_output {
        return run_json(&args, ctx).await;
    }

    let client = ctx.client()?;
    let wa = client.whatsapp();

    let info = client.server().get_info().await?;
    print_heading("Server Information");
    print_field("Server", format!("{} v{}", info.name, info.version));
    print_field("Description", &info.description);

    let tools = client.server().list_tools().await?;
    print_heading("Available Tools");
    for tool in &tools.tools {
        println!("  - {}: {}", tool.name, tool.description);
    }

    let status: StatusPayload = wa.get_status().await?.decode()?;
    print_heading("Connection Status");
    print_field("Status", &status.status);
    print_field("Message", &status.message);

    let check: CheckNumberPayload = wa.check_number(&args.number).await?.decode()?;
    print_heading(&format!("Checking Number: {}", args.number));
    print_field("Number exists", format!("{} {}", mark(check.exists), check.exists));
    print_field("Message", &check.message);

    let conversations: ConversationsPayload = wa.get_conversations(None).await?.decode()?;
    print_heading("Recent Conversations");
    print_field("Success", conversations.success);
    print_field("Conversations count", conversations.count);
    for conv in conversations.conversations.iter().take(SHOWN_CONVERSATIONS) {
        print_conversation(conv);
    }

    if args.messages {
        let messages: MessagesPayload =
            wa.get_messages(&args.number, Some(10)).await?.decode()?;
        print_heading(&format!("Messages from: {}", args.number));
        print_field("Success", messages.success);
        print_field("Messages count", messages.count);
        let skip = messages.messages.len().saturating_sub(SHOWN_MESSAGES);
        for msg in &messages.messages[skip..] {
            print_message(msg);
        }
    }

    if let Some(text) = &args.send {
        let sent: SendMessagePayload = wa.send_message(&args.number, text).await?.decode()?;
        print_heading(&format!("Sending Message to: {}", args.number));
        print_field("Success", format!("{} {}", mark(sent.success), sent.success));
        print_field("Message", &sent.message);
    }

    println!();
    Ok(())
}

/// Collect every step into one JSON document.
async fn run_json(args: &DemoArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let wa = client.whatsapp();

    let info = client.server().get_info().await?;
    let tools = client.server().list_tools().await?;
    let status: StatusPayload = wa.get_status().await?.decode()?;
    let check: CheckNumberPayload = wa.check_number(&args.number).await?.decode()?;
    let conversations: ConversationsPayload = wa.get_conversations(None).await?.decode()?;

    let messages: Option<MessagesPayload> = if args.messages {
        Some(wa.get_messages(&args.number, Some(10)).await?.decode()?)
    } else {
        None
    };
    let sent: Option<SendMessagePayload> = match &args.send {
        Some(text) => Some(wa.send_message(&args.number, text).await?.decode()?),
        None => None,
    };

    print_json(&json!({
        "server": info,
        "tools": tools.tools,
        "status": status,
        "check": check,
        "conversations": conversations,
        "messages": messages,
        "sent": sent,
    }))
}
