//! Twilio messaging adapter.
//!
//! Implements [`MessageSender`](crate::port::MessageSender) over the Twilio
//! REST API, with WhatsApp or plain SMS delivery.

mod client;
mod dto;
pub mod settings;

pub use client::{AccountStatus, TwilioSender};
pub use settings::{Channel, TwilioConfig, TwilioCredentials};
