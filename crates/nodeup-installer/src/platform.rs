//! Platform detection and artifact resolution
//!
//! Maps an OS/architecture/ARM-variant triple plus a Node.js version onto
//! the artifact published at the distribution mirror. Detection runs once
//! per process; resolution is a pure function of its inputs.

use nodeup_core::config::DEFAULT_DIST_URL;
use nodeup_core::{Error, NodeVersion, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// First release published with per-architecture `win-*` and ARM tarballs
const MODERN_LAYOUT: NodeVersion = NodeVersion::new(4, 0, 0);

/// Package manager archive fetched for Windows installs
pub const WINDOWS_NPM_ARCHIVE: &str = "npm-1.4.12.zip";

/// Operating system families the distribution mirror knows about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    SunOs,
    Linux,
    /// Anything else, keeping the raw OS name for error messages
    Other(String),
}

impl HostOs {
    /// Detect the current operating system
    pub fn detect() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name
    pub fn from_name(name: &str) -> Self {
        match name {
            "windows" => HostOs::Windows,
            "macos" => HostOs::MacOs,
            "solaris" | "illumos" => HostOs::SunOs,
            "linux" => HostOs::Linux,
            other => HostOs::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Windows => write!(f, "Windows"),
            HostOs::MacOs => write!(f, "Darwin"),
            HostOs::SunOs => write!(f, "SunOS"),
            HostOs::Linux => write!(f, "Linux"),
            HostOs::Other(name) => write!(f, "{}", name),
        }
    }
}

/// The host as seen by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub os: HostOs,
    /// Pointer width of the process, 32 or 64
    pub bits: u32,
    /// Machine name as reported by `uname -m` (`x86_64`, `armv7l`, ...)
    pub machine: String,
}

impl PlatformDescriptor {
    pub fn new(os: HostOs, bits: u32, machine: impl Into<String>) -> Self {
        Self {
            os,
            bits,
            machine: machine.into(),
        }
    }

    /// Detect the current platform
    pub fn detect() -> Self {
        let os = HostOs::detect();
        let bits = usize::BITS;
        let machine = if os == HostOs::Windows {
            std::env::consts::ARCH.to_string()
        } else {
            uname_machine().unwrap_or_else(|| std::env::consts::ARCH.to_string())
        };

        let platform = Self { os, bits, machine };
        debug!("Detected platform: {}", platform);
        platform
    }

    pub fn is_windows(&self) -> bool {
        self.os == HostOs::Windows
    }

    /// ARM Linux, including 64-bit `aarch64`
    pub fn is_arm(&self) -> bool {
        self.os == HostOs::Linux
            && (self.machine.to_ascii_lowercase().starts_with("arm") || self.machine == "aarch64")
    }

    fn is_armv6l(&self) -> bool {
        self.machine == "armv6l"
    }

    fn is_armv7l(&self) -> bool {
        self.machine == "armv7l"
    }

    /// Architecture label used in artifact names
    pub fn arch_label(&self) -> String {
        match self.bits {
            32 => "x86".to_string(),
            64 => "x64".to_string(),
            other => other.to_string(),
        }
    }

    /// OS label used in artifact names
    pub fn os_label(&self) -> Result<&'static str> {
        let label = match self.os {
            HostOs::MacOs => "darwin",
            HostOs::SunOs => "sunos",
            HostOs::Linux if self.is_arm() && self.is_armv6l() => "linux-armv6l",
            HostOs::Linux if self.is_arm() && self.is_armv7l() => "linux-armv7l",
            HostOs::Linux if self.is_arm() && self.bits == 64 => "linux-arm64",
            HostOs::Linux => "linux",
            HostOs::Windows => "windows",
            HostOs::Other(_) => return Err(self.unsupported()),
        };
        Ok(label)
    }

    fn unsupported(&self) -> Error {
        Error::unsupported_platform(format!(
            "Unsupported architecture: {} - {} bits",
            self.os, self.bits
        ))
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} bits)", self.os, self.machine, self.bits)
    }
}

fn uname_machine() -> Option<String> {
    let output = std::process::Command::new("uname").arg("-m").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let machine = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!machine.is_empty()).then_some(machine)
}

/// How a downloaded artifact is placed into the target directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistType {
    Zip,
    /// A bare executable (Windows `node.exe`)
    File,
    /// A gzipped tarball with one top-level directory
    Tar,
}

impl fmt::Display for DistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistType::Zip => write!(f, "zip"),
            DistType::File => write!(f, "file"),
            DistType::Tar => write!(f, "tar"),
        }
    }
}

/// A downloadable artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetReference {
    pub url: String,
    pub dist_type: DistType,
}

impl AssetReference {
    /// Last segment of the URL path
    pub fn file_name(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        parsed
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .next_back()
            .map(str::to_string)
    }
}

/// Turns versions into artifact URLs for one distribution mirror
#[derive(Debug, Clone)]
pub struct AssetResolver {
    dist_url: String,
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DIST_URL)
    }
}

impl AssetResolver {
    pub fn new(dist_url: impl Into<String>) -> Self {
        let mut dist_url = dist_url.into();
        if !dist_url.ends_with('/') {
            dist_url.push('/');
        }
        Self { dist_url }
    }

    /// Base URL of the mirror, always ending in `/`
    pub fn dist_url(&self) -> &str {
        &self.dist_url
    }

    /// Resolve the runtime artifact for `version` on `platform`
    pub fn resolve(
        &self,
        version: &NodeVersion,
        platform: &PlatformDescriptor,
    ) -> Result<AssetReference> {
        let arch = platform.arch_label();

        let (path, dist_type) = match platform.os {
            HostOs::Windows => {
                let path = if *version >= MODERN_LAYOUT {
                    format!("win-{}/node.exe", arch)
                } else if platform.bits == 32 {
                    "node.exe".to_string()
                } else {
                    format!("{}/node.exe", arch)
                };
                (path, DistType::File)
            }
            HostOs::MacOs | HostOs::SunOs => (
                format!("node-v{}-{}-{}.tar.gz", version, platform.os_label()?, arch),
                DistType::Tar,
            ),
            HostOs::Linux if !platform.is_arm() => (
                format!("node-v{}-{}-{}.tar.gz", version, platform.os_label()?, arch),
                DistType::Tar,
            ),
            HostOs::Linux => {
                if *version < MODERN_LAYOUT {
                    return Err(Error::unsupported_platform(
                        "Node.js < 4.0 cannot be installed on computers with ARM processors. \
                         Install Node.js globally on your machine first, then run again, \
                         or use a version of Node.js >= 4.0.",
                    ));
                }

                if platform.is_armv6l() || platform.is_armv7l() || platform.bits == 64 {
                    (
                        format!("node-v{}-{}.tar.gz", version, platform.os_label()?),
                        DistType::Tar,
                    )
                } else {
                    return Err(Error::unsupported_platform(
                        "Node.js cannot be installed on 32-bit ARM processors that are \
                         not v6l or v7l. Install Node.js globally on your machine first, \
                         then run again.",
                    ));
                }
            }
            HostOs::Other(_) => return Err(platform.unsupported()),
        };

        Ok(AssetReference {
            url: format!("{}v{}/{}", self.dist_url, version, path),
            dist_type,
        })
    }

    /// The pinned npm archive used to bootstrap npm on Windows
    pub fn windows_npm_archive(&self) -> AssetReference {
        AssetReference {
            url: format!("{}npm/{}", self.dist_url, WINDOWS_NPM_ARCHIVE),
            dist_type: DistType::Zip,
        }
    }
}
