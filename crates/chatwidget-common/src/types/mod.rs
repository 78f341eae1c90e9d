mod color;
mod message;

pub use color::*;
pub use message::*;
