pub mod common;
pub mod config;
pub mod error;
pub mod poll;

pub use common::*;
pub use config::*;
pub use error::*;
pub use poll::*;
