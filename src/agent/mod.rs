//! Agent module for Fitbot
//!
//! This module contains the dialogue loop, per-session conversation state,
//! and turn metrics.

pub mod conversation;
pub mod core;
pub mod metrics;

pub use conversation::Conversation;
pub use core::{Advisory, Agent, ReplySource, TurnReply};
