//! Bin wrapper scripts
//!
//! Each managed executable gets a small script in the project's bin
//! directory. Local scripts point at the managed install through a path
//! relative to the script itself, so the project directory can move. Global
//! scripts exec an absolute path found on the search path.

use nodeup_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::debug;

/// Executables wrapped in the bin directory
pub const MANAGED_BINARIES: &[&str] = &["node", "npm", "npx"];

/// Suffix of wrapper scripts on Windows
const WINDOWS_SUFFIX: &str = ".bat";

/// Embedded templates, keyed by `<local|global>/<script name>`
const TEMPLATES: &[(&str, &str)] = &[
    ("local/node", include_str!("templates/local/node.tera")),
    ("local/npm", include_str!("templates/local/npm.tera")),
    ("local/npx", include_str!("templates/local/npx.tera")),
    ("local/node.bat", include_str!("templates/local/node.bat.tera")),
    ("local/npm.bat", include_str!("templates/local/npm.bat.tera")),
    ("local/npx.bat", include_str!("templates/local/npx.bat.tera")),
    ("global/node", include_str!("templates/global/node.tera")),
    ("global/npm", include_str!("templates/global/npm.tera")),
    ("global/npx", include_str!("templates/global/npx.tera")),
    ("global/node.bat", include_str!("templates/global/node.bat.tera")),
    ("global/npm.bat", include_str!("templates/global/npm.bat.tera")),
    ("global/npx.bat", include_str!("templates/global/npx.bat.tera")),
];

/// One wrapper script to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinScriptSpec {
    /// File name inside the bin directory (`node`, `npm.bat`, ...)
    pub script_name: String,
    /// Command the script runs (`node`, `npm`, `npx`)
    pub target_command: &'static str,
    pub is_local: bool,
}

impl BinScriptSpec {
    fn template_name(&self) -> String {
        let scope = if self.is_local { "local" } else { "global" };
        format!("{}/{}", scope, self.script_name)
    }
}

/// Every script file name that may exist in a bin directory
pub fn script_names(is_windows: bool) -> Vec<String> {
    let suffix = if is_windows { WINDOWS_SUFFIX } else { "" };
    MANAGED_BINARIES
        .iter()
        .map(|name| format!("{}{}", name, suffix))
        .collect()
}

/// Renders and writes wrapper scripts
pub struct BinScriptWriter {
    tera: Tera,
    is_windows: bool,
}

impl BinScriptWriter {
    pub fn new(is_windows: bool) -> Result<Self> {
        let mut tera = Tera::default();
        for (name, content) in TEMPLATES {
            tera.add_raw_template(name, content)
                .map_err(|e| Error::Template(format!("{}: {}", name, e)))?;
        }
        Ok(Self { tera, is_windows })
    }

    pub fn is_windows(&self) -> bool {
        self.is_windows
    }

    /// The scripts to generate for a local or global install
    pub fn specs(&self, is_local: bool) -> Vec<BinScriptSpec> {
        MANAGED_BINARIES
            .iter()
            .zip(script_names(self.is_windows))
            .map(|(command, script_name)| BinScriptSpec {
                script_name,
                target_command: *command,
                is_local,
            })
            .collect()
    }

    /// Render a script pointing at `path`
    ///
    /// For local scripts `path` is the install directory relative to the bin
    /// directory, with a trailing `/`. For global scripts it is the absolute
    /// path of the executable.
    pub fn render(&self, spec: &BinScriptSpec, path: &str) -> Result<String> {
        let path = if self.is_windows && spec.is_local {
            path.replace('/', "\\")
        } else {
            path.to_string()
        };

        let mut context = Context::new();
        context.insert("path", &path);

        self.tera
            .render(&spec.template_name(), &context)
            .map_err(|e| Error::Template(format!("{}: {}", spec.template_name(), e)))
    }

    /// Render and write a script into `bin_dir` with mode 0755
    pub fn write(&self, bin_dir: &Path, spec: &BinScriptSpec, path: &str) -> Result<PathBuf> {
        let content = self.render(spec, path)?;
        let script_path = bin_dir.join(&spec.script_name);

        fs::write(&script_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))?;
        }

        debug!("Wrote {}", script_path.display());
        Ok(script_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_script_names() {
        assert_eq!(script_names(false), vec!["node", "npm", "npx"]);
        assert_eq!(script_names(true), vec!["node.bat", "npm.bat", "npx.bat"]);
    }

    #[test]
    fn test_specs() {
        let writer = BinScriptWriter::new(true).unwrap();
        let specs = writer.specs(false);
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[1].script_name, "npm.bat");
        assert_eq!(specs[1].target_command, "npm");
        assert!(!specs[1].is_local);
    }

    #[test]
    fn test_render_local_unix() {
        let writer = BinScriptWriter::new(false).unwrap();
        let specs = writer.specs(true);
        let spec = &specs[0];
        let script = writer
            .render(spec, "../mouf/nodejs-installer/downloads/nodejs/")
            .unwrap();

        assert!(script.starts_with("#!/usr/bin/env sh\n"));
        assert!(script
            .contains("NODE_BIN=\"$SELF_DIR/../mouf/nodejs-installer/downloads/nodejs/bin\""));
        assert!(script.contains("exec \"$NODE_BIN/node\" \"$@\""));
    }

    #[test]
    fn test_render_local_windows_uses_backslashes() {
        let writer = BinScriptWriter::new(true).unwrap();
        let specs = writer.specs(true);
        let spec = &specs[0];
        let script = writer.render(spec, "../mouf/nodejs-installer/downloads/nodejs/").unwrap();
        assert!(script
            .contains("@\"%~dp0..\\mouf\\nodejs-installer\\downloads\\nodejs\\node.exe\" %*"));
    }

    #[test]
    fn test_render_global() {
        let writer = BinScriptWriter::new(false).unwrap();
        let specs = writer.specs(false);
        let spec = &specs[2];
        let script = writer.render(spec, "/usr/local/bin/npx").unwrap();
        assert!(script.starts_with("#!/usr/bin/env sh\n"));
        assert!(script.contains("exec \"/usr/local/bin/npx\" \"$@\""));
    }

    #[test]
    fn test_write_sets_mode() {
        let temp = TempDir::new().unwrap();
        let writer = BinScriptWriter::new(false).unwrap();
        let specs = writer.specs(true);
        let spec = &specs[1];

        let path = writer.write(temp.path(), spec, "../nodejs/").unwrap();
        assert_eq!(path, temp.path().join("npm"));
        assert!(fs::read_to_string(&path).unwrap().contains("$NODE_BIN/npm"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }
}
