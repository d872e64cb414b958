#![warn(clippy::pedantic)]

pub mod chunk_reader;
pub mod container;
pub mod decoder;
pub mod error;
pub mod record;

pub use container::Container;
pub use decoder::{WorldDecoder, WorldModel};
pub use error::DecodeError;
