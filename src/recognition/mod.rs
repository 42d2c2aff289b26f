pub mod archive;
pub mod client;
pub mod prompts;

pub use archive::*;
pub use client::*;
pub use prompts::*;
