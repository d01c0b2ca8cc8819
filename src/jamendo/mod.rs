pub mod client;
pub mod models;

pub use client::JamendoClient;
pub use models::Track;
