pub mod build_config;
pub mod configs;
pub mod debian_dir;
pub mod error;
pub mod handler;
pub mod misc;
pub mod source;
pub mod source_package;
pub mod steps;
