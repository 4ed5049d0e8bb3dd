//! Node.js installation
//!
//! Downloads the artifact for the detected platform into the vendor
//! directory, then places it into the target directory:
//!
//! - **Tarballs** (Linux, macOS, SunOS): `tar -xvf <file> -C <dir> --strip 1`,
//!   keeping symlinks such as `bin/npm` intact
//! - **Windows**: `node.exe` is moved into place, then the pinned npm archive
//!   is unpacked next to it and npm updates itself

use async_trait::async_trait;
use nodeup_core::utils::ROOT_MANIFEST;
use nodeup_core::{closest_file_path, make_path_relative, Error, NodeVersion, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use crate::bin_scripts::BinScriptWriter;
use crate::download::Downloader;
use crate::path_env::{prepend_search_path, register_path};
use crate::platform::{AssetReference, AssetResolver, DistType, PlatformDescriptor};
use crate::probe::{Probe, ProcessProbe};
use crate::traits::RuntimeInstaller;

/// Installs Node.js for one project
pub struct NodeInstaller {
    vendor_dir: PathBuf,
    platform: PlatformDescriptor,
    resolver: AssetResolver,
    downloader: Downloader,
    probe: ProcessProbe,
    scripts: BinScriptWriter,
}

impl NodeInstaller {
    /// Create an installer for the current platform
    ///
    /// Downloads land in `vendor_dir` before being placed.
    pub fn new(vendor_dir: impl Into<PathBuf>, dist_url: &str) -> Result<Self> {
        Self::with_platform(vendor_dir, dist_url, PlatformDescriptor::detect())
    }

    /// Create an installer for an explicit platform
    pub fn with_platform(
        vendor_dir: impl Into<PathBuf>,
        dist_url: &str,
        platform: PlatformDescriptor,
    ) -> Result<Self> {
        let scripts = BinScriptWriter::new(platform.is_windows())?;
        Ok(Self {
            vendor_dir: vendor_dir.into(),
            resolver: AssetResolver::new(dist_url),
            downloader: Downloader::new()?,
            probe: ProcessProbe::new(),
            scripts,
            platform,
        })
    }

    /// Replace the probe, e.g. to search an explicit path
    pub fn with_probe(mut self, probe: ProcessProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Enable or disable download progress bars
    pub fn with_progress(mut self, show: bool) -> Self {
        self.downloader = self.downloader.with_progress(show);
        self
    }

    pub fn platform(&self) -> &PlatformDescriptor {
        &self.platform
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    /// Closest ancestor of the vendor directory holding the root manifest
    pub fn project_root(&self) -> PathBuf {
        closest_file_path(&self.vendor_dir, ROOT_MANIFEST)
            .or_else(|| self.vendor_dir.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.vendor_dir.clone())
    }

    /// Resolve, download, and place `version` into `target_dir`
    pub async fn install(&self, version: &NodeVersion, target_dir: &Path) -> Result<PathBuf> {
        let asset = self.resolver.resolve(version, &self.platform)?;

        info!("Installing Node.js v{}", version);
        info!("Using origin: {}", asset.url);

        fs::create_dir_all(&self.vendor_dir)?;
        let archive = self.downloader.download(&asset, &self.vendor_dir).await?;

        self.place(&asset, &archive, target_dir).await?;

        info!("Node.js v{} installed in {}", version, target_dir.display());
        Ok(target_dir.to_path_buf())
    }

    /// Place a downloaded artifact into `target_dir`
    pub async fn place(
        &self,
        asset: &AssetReference,
        archive: &Path,
        target_dir: &Path,
    ) -> Result<()> {
        prepare_target(target_dir)?;

        match asset.dist_type {
            DistType::Tar => {
                extract_tar(archive, target_dir).await?;
                fs::remove_file(archive)?;
            }
            DistType::Zip => {
                extract_zip(archive, target_dir).await?;
                fs::remove_file(archive)?;
            }
            DistType::File => {
                let file_name = archive.file_name().ok_or_else(|| {
                    Error::installer(format!("'{}' is not a file", archive.display()))
                })?;
                move_file(archive, &target_dir.join(file_name))?;
                self.install_windows_npm(target_dir).await?;
            }
        }

        Ok(())
    }

    /// Unpack the pinned npm archive into `target_dir` and let npm update itself
    async fn install_windows_npm(&self, target_dir: &Path) -> Result<()> {
        let npm_asset = self.resolver.windows_npm_archive();
        info!("Installing npm from {}", npm_asset.url);

        let archive = self.downloader.download(&npm_asset, &self.vendor_dir).await?;
        extract_zip(&archive, target_dir).await?;
        fs::remove_file(&archive)?;

        let target = target_dir.canonicalize()?;
        let current = std::env::var("PATH").unwrap_or_default();
        let search_path = prepend_search_path(&target.to_string_lossy(), &current, true);

        let status = Command::new("cmd")
            .args(["/C", "npm", "update", "npm"])
            .current_dir(&target)
            .env("PATH", search_path)
            .status()
            .await?;

        if !status.success() {
            return Err(Error::installer(
                "An error occurred while updating npm to the latest version.",
            ));
        }

        // Plain `npm` shell script for Cygwin users
        let cygwin_npm = target.join("node_modules").join("npm").join("bin").join("npm");
        if cygwin_npm.is_file() {
            fs::copy(&cygwin_npm, target.join("npm"))?;
        }

        Ok(())
    }

    /// Write wrapper scripts for every managed binary into `bin_dir`
    pub fn create_bin_scripts(
        &self,
        bin_dir: &Path,
        target_dir: &Path,
        is_local: bool,
    ) -> Result<Vec<PathBuf>> {
        if !bin_dir.exists() {
            fs::create_dir_all(bin_dir).map_err(|e| {
                Error::installer(format!("Unable to create directory {}: {}", bin_dir.display(), e))
            })?;
        }
        let bin_dir = bin_dir.canonicalize()?;

        let mut written = Vec::new();

        for spec in self.scripts.specs(is_local) {
            let path = if is_local {
                let target = target_dir.canonicalize()?;
                make_path_relative(&target.to_string_lossy(), &bin_dir.to_string_lossy())
            } else {
                let probe = if spec.target_command == "node" {
                    self.probe.node_global_path()
                } else {
                    self.probe.locate(spec.target_command)
                };

                let Probe::Found(found) = probe else {
                    debug!("No global {}; skipping {}", spec.target_command, spec.script_name);
                    continue;
                };

                if is_inside(&found, &bin_dir) {
                    debug!("{} already points into {}", found.display(), bin_dir.display());
                    continue;
                }

                found.to_string_lossy().into_owned()
            };

            written.push(self.scripts.write(&bin_dir, &spec, &path)?);
        }

        Ok(written)
    }
}

#[async_trait]
impl RuntimeInstaller for NodeInstaller {
    async fn global_version(&self) -> Option<NodeVersion> {
        self.probe.global_version().await
    }

    fn global_path(&self, command: &str) -> Probe {
        self.probe.locate(command)
    }

    async fn local_version(&self, bin_dir: &Path) -> Option<NodeVersion> {
        self.probe.local_version(&self.project_root(), bin_dir).await
    }

    async fn install(&self, version: &NodeVersion, target_dir: &Path) -> Result<PathBuf> {
        NodeInstaller::install(self, version, target_dir).await
    }

    fn create_bin_scripts(
        &self,
        bin_dir: &Path,
        target_dir: &Path,
        is_local: bool,
    ) -> Result<Vec<PathBuf>> {
        NodeInstaller::create_bin_scripts(self, bin_dir, target_dir, is_local)
    }

    fn register_path(&self, bin_dir: &Path, current_path: &str) -> String {
        register_path(bin_dir, current_path, self.platform.is_windows())
    }
}

/// True when the directory holding `file` is `dir` or below it
fn is_inside(file: &Path, dir: &Path) -> bool {
    file.parent()
        .and_then(|parent| parent.canonicalize().ok())
        .is_some_and(|parent| parent.starts_with(dir))
}

/// Create the target directory (0775) and check it is writable
fn prepare_target(target_dir: &Path) -> Result<()> {
    if !target_dir.exists() {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o775);
        }
        builder.create(target_dir)?;
    }

    if fs::metadata(target_dir)?.permissions().readonly() {
        return Err(Error::installer(format!(
            "'{}' is not writable",
            target_dir.display()
        )));
    }

    Ok(())
}

async fn extract_tar(archive: &Path, target_dir: &Path) -> Result<()> {
    debug!("Extracting {} to {}", archive.display(), target_dir.display());

    let output = Command::new("tar")
        .arg("-xvf")
        .arg(archive)
        .arg("-C")
        .arg(target_dir)
        .args(["--strip", "1"])
        .output()
        .await?;

    if !output.status.success() {
        return Err(Error::installer(format!(
            "An error occurred while extracting Node.js ({}) to {}: {}",
            archive.display(),
            target_dir.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}

/// Unpack a zip archive; bsdtar (shipped with Windows 10+) reads zip
async fn extract_zip(archive: &Path, target_dir: &Path) -> Result<()> {
    debug!("Unzipping {} to {}", archive.display(), target_dir.display());

    let output = Command::new("tar")
        .arg("-xf")
        .arg(archive)
        .arg("-C")
        .arg(target_dir)
        .output()
        .await?;

    if !output.status.success() {
        return Err(Error::installer(format!(
            "Unable to extract file {}: {}",
            archive.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}

/// Rename, falling back to copy + delete across filesystems
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HostOs;
    use tempfile::TempDir;

    fn linux_installer(vendor_dir: &Path, search_path: &Path) -> NodeInstaller {
        NodeInstaller::with_platform(
            vendor_dir,
            "https://nodejs.org/dist/",
            PlatformDescriptor::new(HostOs::Linux, 64, "x86_64"),
        )
        .unwrap()
        .with_probe(ProcessProbe::with_search_path(search_path))
        .with_progress(false)
    }

    #[test]
    fn test_project_root_from_vendor_dir() {
        let temp = TempDir::new().unwrap();
        let vendor = temp.path().join("vendor");
        fs::create_dir_all(&vendor).unwrap();
        fs::write(temp.path().join("composer.json"), "{}").unwrap();

        let installer = linux_installer(&vendor, temp.path());
        assert_eq!(installer.project_root(), temp.path());
    }

    #[test]
    fn test_prepare_target_creates_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a").join("b").join("nodejs");
        prepare_target(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_local_bin_scripts_point_at_target() {
        let temp = TempDir::new().unwrap();
        let vendor = temp.path().join("vendor");
        let target = vendor.join("mouf").join("nodejs-installer").join("downloads").join("nodejs");
        fs::create_dir_all(&target).unwrap();
        let bin_dir = vendor.join("bin");

        let installer = linux_installer(&vendor, temp.path());
        let written = installer.create_bin_scripts(&bin_dir, &target, true).unwrap();

        assert_eq!(written.len(), 3);
        let node = fs::read_to_string(bin_dir.join("node")).unwrap();
        assert!(node.contains("$SELF_DIR/../mouf/nodejs-installer/downloads/nodejs/bin"));
        assert!(bin_dir.join("npm").is_file());
        assert!(bin_dir.join("npx").is_file());
    }

    #[test]
    fn test_global_bin_scripts_skip_missing_commands() {
        let temp = TempDir::new().unwrap();
        let empty_path = temp.path().join("empty");
        fs::create_dir_all(&empty_path).unwrap();
        let bin_dir = temp.path().join("vendor").join("bin");

        let installer = linux_installer(&temp.path().join("vendor"), &empty_path);
        let written = installer
            .create_bin_scripts(&bin_dir, temp.path(), false)
            .unwrap();

        assert!(written.is_empty());
        assert!(bin_dir.is_dir());
    }

    #[test]
    fn test_register_path_uses_platform_separator() {
        let temp = TempDir::new().unwrap();
        let installer = linux_installer(temp.path(), temp.path());
        let value =
            RuntimeInstaller::register_path(&installer, Path::new("/no/such/bin"), "/usr/bin");
        assert_eq!(value, "/no/such/bin:/usr/bin");
    }
}
