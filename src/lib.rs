//! tochka - trading point lookup bot.
//!
//! Core library: the normalized record store, the lookup service,
//! tabular data sources, and the Telegram transport.

pub mod bot;
pub mod cli;
pub mod config;
pub mod lookup;
pub mod models;
pub mod schema;
pub mod source;
pub mod store;
pub mod utils;
