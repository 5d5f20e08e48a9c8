// Services module for business logic
pub mod akismet_client;
pub mod console;
pub mod install_validator;
pub mod scaffold_deployer;
