// Models module for data structures
pub mod deploy_report;
pub mod install_target;
pub mod spam_check;
pub mod template_context;
