pub mod autostart;
pub mod cli;
mod error;
pub mod roots;
pub mod signals;

pub use error::Error;
