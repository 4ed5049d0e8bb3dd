//! Fake executables and archives
//!
//! Process probes run real child processes; these helpers put shell scripts
//! in their place. Unix only.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Write an executable shell script
#[cfg(unix)]
pub fn create_script(path: &Path, body: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(format!("#!/bin/sh\n{}\n", body).as_bytes())?;

    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;

    Ok(())
}

/// A fake `node` that answers `-v` with `v<version>`
#[cfg(unix)]
pub fn create_node_script(path: &Path, version: &str) -> std::io::Result<()> {
    create_script(
        path,
        &format!(
            "if [ \"$1\" = \"-v\" ]; then\n    echo \"v{}\"\n    exit 0\nfi\nexit 1",
            version
        ),
    )
}

/// A fake `node` that always fails
#[cfg(unix)]
pub fn create_failing_script(path: &Path) -> std::io::Result<()> {
    create_script(path, "echo 'broken' >&2\nexit 3")
}

/// Build `node-v<version>-linux-x64.tar.gz` holding a fake `bin/node`
///
/// Returns the archive bytes.
#[cfg(unix)]
pub fn build_node_tarball(work_dir: &Path, version: &str) -> Vec<u8> {
    let top = format!("node-v{}-linux-x64", version);
    let staging = work_dir.join("staging");
    create_node_script(&staging.join(&top).join("bin").join("node"), version).unwrap();

    let archive = work_dir.join(format!("{}.tar.gz", top));
    let status = Command::new("tar")
        .arg("-czf")
        .arg(&archive)
        .arg("-C")
        .arg(&staging)
        .arg(&top)
        .status()
        .unwrap();
    assert!(status.success(), "tar failed to build the fixture archive");

    fs::read(&archive).unwrap()
}

/// Directory holding only the given scripts, for use as a search path
#[cfg(unix)]
pub fn search_path_with(dir: &Path, scripts: &[(&str, &str)]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    for (name, version) in scripts {
        create_node_script(&dir.join(name), version).unwrap();
    }
    dir.to_path_buf()
}
