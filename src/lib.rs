pub mod advisor;
pub mod advisory;
pub mod ai_provider;
pub mod chat;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod map;
pub mod stats;
