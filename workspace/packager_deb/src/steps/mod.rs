pub mod clone_source;
pub mod configure_build;
pub mod create_debian_dir;
pub mod pack_source;
pub mod perform_build;
pub mod prepare_source;
pub mod resolve_version;
