// askbot-setup - Askbot site installer
// Core library functionality

pub mod cli;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use models::*;
pub use services::*;
