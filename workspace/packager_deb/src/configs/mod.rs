pub mod pkg_config;
