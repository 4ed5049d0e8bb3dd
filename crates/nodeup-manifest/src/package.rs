//! Package manifest entries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One package as described by `composer.json` or `installed.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub package_type: Option<String>,

    #[serde(default)]
    pub autoload: Autoload,

    /// Free-form `extra` section
    #[serde(default)]
    pub extra: Map<String, Value>,

    /// Composer `config` section (only meaningful on the root package)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

/// Autoload rules; only PSR-4 matters for owner lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Autoload {
    #[serde(default, rename = "psr-4")]
    pub psr4: BTreeMap<String, Value>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declare a PSR-4 namespace prefix
    pub fn with_psr4(mut self, prefix: impl Into<String>, dir: impl Into<String>) -> Self {
        self.autoload
            .psr4
            .insert(prefix.into(), Value::String(dir.into()));
        self
    }

    /// Declare a Node.js version constraint under `extra.mouf.nodejs.version`
    pub fn with_node_constraint(mut self, constraint: impl Into<String>) -> Self {
        let mouf = self
            .extra
            .entry("mouf")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(mouf) = mouf {
            let nodejs = mouf
                .entry("nodejs")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(nodejs) = nodejs {
                nodejs.insert("version".to_string(), Value::String(constraint.into()));
            }
        }
        self
    }

    /// The declared Node.js constraint, if any
    pub fn node_constraint(&self) -> Option<&str> {
        self.extra
            .get("mouf")?
            .get("nodejs")?
            .get("version")?
            .as_str()
    }

    /// PSR-4 namespace prefixes in declaration order
    pub fn psr4_prefixes(&self) -> impl Iterator<Item = &str> {
        self.autoload.psr4.keys().map(String::as_str)
    }

    /// The `extra` section as a JSON value
    pub fn extra_value(&self) -> Value {
        Value::Object(self.extra.clone())
    }
}
