pub mod dch;
pub mod debuild;
pub mod dpkg_architecture;
pub mod execute;
pub mod git;
pub mod tar;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
