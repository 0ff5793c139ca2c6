pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod signal;
pub mod tools;

pub use component::{PreviewGenerator, PreviewMode, PreviewOutcome};
pub use config::Config;
pub use error::PreviewError;
