//! SerpAPI Google Flights fare lookup.

mod client;
mod dto;
pub mod settings;

pub use client::SerpApiClient;
pub use settings::SerpApiConfig;
