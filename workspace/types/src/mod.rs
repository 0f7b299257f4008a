pub mod config;
pub mod debian;
pub mod defaults;
pub mod git_remote;
pub mod identity;
