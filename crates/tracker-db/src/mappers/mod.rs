//! Entity <-> model mappers

mod channel;
mod emoji_stat;
mod usage_event;
mod user;
