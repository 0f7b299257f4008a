pub const CONFIG_FILE_NAME: &str = "deb-buildscripts.toml";
pub const WORKDIR_ROOT: &str = ".";

/// Used in `Maintainer:` and for `dch` when the manifest names nobody.
pub const PLACEHOLDER_MAINTAINER: &str = "None <none@example.com>";

pub const DEBHELPER_BUILD_DEPENDENCY: &str = "debhelper (>= 8)";
pub const DEBHELPER_COMPAT_LEVEL: &str = "8";
pub const SOURCE_FORMAT: &str = "3.0 (quilt)";
pub const STANDARDS_VERSION: &str = "3.9.2";

/// Looked up in the upstream tree, first match wins.
pub const LICENSE_CANDIDATES: [&str; 4] = ["COPYING", "LICENSE", "LICENSE.md", "LICENSE.txt"];

/// `make -j` value when the CPU count cannot be detected.
pub const FALLBACK_PARALLELISM: usize = 2;
