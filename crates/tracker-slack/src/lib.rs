//! # tracker-slack
//!
//! Slack integration: a `DirectoryClient` implementation over the Slack Web
//! API and the Events API payload types consumed by the ingest binary.

pub mod client;
pub mod events;

pub use client::SlackDirectoryClient;
pub use events::{
    ChannelPayload, EventEnvelope, MessagePostedEvent, ReactionAddedEvent, ReactionItem,
    SlackEvent, UserPayload, UserProfilePayload,
};
