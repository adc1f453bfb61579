pub mod chatbot;
pub mod client;
pub mod provider;
pub mod session;
