use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use debian::{
    debuild::{Debuild, Signing},
    execute::{CommandRunner, Execute},
    git::GitClone,
    tar::TarXz,
};
use filetime::FileTime;
use log::{info, warn};
use sha2::{Digest, Sha256};
use types::git_remote::GitRemote;

use crate::{error::PackagingError, source_package::SourcePackage};

/// Clones the upstream repository into `<workdir>/<name>`.
pub fn clone_source(
    package: &SourcePackage,
    url: &GitRemote,
    runner: &dyn CommandRunner,
) -> Result<(), PackagingError> {
    let name = package.identity().name()?;
    fs::create_dir_all(package.workdir())?;
    info!("Cloning {} into {}", url, package.project_dir()?.display());
    GitClone::new(url.to_string(), name)
        .workdir(package.workdir())
        .execute(runner)?;
    Ok(())
}

/// Runs shell commands inside the checkout, e.g. submodule updates.
pub fn prepare_source(
    package: &SourcePackage,
    commands: &[String],
    runner: &dyn CommandRunner,
) -> Result<(), PackagingError> {
    for command in commands {
        runner.run(&package.shell(command.as_str(), true)?)?;
    }
    Ok(())
}

fn remove_dir_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn set_creation_time<P: AsRef<Path>>(dir_path: P, timestamp: FileTime) -> io::Result<()> {
    filetime::set_file_mtime(&dir_path, timestamp)?;

    let mut stack = vec![PathBuf::from(dir_path.as_ref())];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let file_path = entry.path();

            if file_type.is_symlink() {
                filetime::set_symlink_file_times(&file_path, timestamp, timestamp)?;
            } else {
                if file_type.is_dir() {
                    stack.push(file_path.clone());
                }
                filetime::set_file_times(&file_path, timestamp, timestamp)?;
            }
        }
    }

    Ok(())
}

pub fn calculate_sha256(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}

/// Strips VCS and packaging metadata from the checkout and packs it into
/// `<name>_<version>.orig.tar.xz` next to it.
pub fn pack_source(
    package: &SourcePackage,
    source_date_epoch: Option<i64>,
    runner: &dyn CommandRunner,
) -> Result<PathBuf, PackagingError> {
    let name = package.identity().name()?;
    let project_dir = package.project_dir()?;
    let tarball_name = package.orig_tarball_name()?;

    remove_dir_if_exists(&project_dir.join(".git"))?;
    remove_dir_if_exists(&project_dir.join("debian"))?;

    if let Some(epoch) = source_date_epoch {
        info!("Setting file times under {} to {}", project_dir.display(), epoch);
        set_creation_time(&project_dir, FileTime::from_unix_time(epoch, 0))?;
    }

    TarXz::new(&tarball_name, name)
        .workdir(package.workdir())
        .execute(runner)?;

    let tarball_path = package.orig_tarball_path()?;
    if tarball_path.is_file() {
        info!(
            "{} sha256 {}",
            tarball_name,
            calculate_sha256(&tarball_path)?
        );
    } else {
        warn!("{} was not created", tarball_path.display());
    }
    Ok(tarball_path)
}

/// Source-only debuild in the checkout.
pub fn perform_build(
    package: &SourcePackage,
    signing: Signing,
    runner: &dyn CommandRunner,
) -> Result<(), PackagingError> {
    Debuild::new()
        .signing(signing)
        .current_dir(package.project_dir()?)
        .execute(runner)?;
    Ok(())
}
