#![warn(clippy::pedantic)]

pub mod chunk;
pub mod error;
pub mod field;
pub mod fourcc;

pub use error::WireError;
pub use fourcc::Fourcc;
