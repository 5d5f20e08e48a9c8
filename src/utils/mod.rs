// Shared helpers: errors, configuration, validation and filesystem
pub mod config;
pub mod error;
pub mod fs_utils;
pub mod validation;
