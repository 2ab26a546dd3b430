pub mod client;
pub mod error;
pub mod event_stream;
pub mod events;
pub mod videos;
