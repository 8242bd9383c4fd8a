//! API endpoint implementations.

mod resources;
mod server;
mod whatsapp;

pub use resources::ResourcesApi;
pub use server::ServerApi;
pub use whatsapp::{WhatsAppApi, DEFAULT_LIMIT};
