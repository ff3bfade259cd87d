//! Layered JSON configuration files.
//!
//! `config/default.json` is read first and `config/<env>.json` is merged on
//! top of it, where `<env>` comes from `NODE_ENV` / `APP_ENV`. `CONFIG_DIR`
//! moves the lookup directory. Missing files are not an error; a file that
//! exists but does not parse is logged and ignored.

use serde_json::{Map, Value};
use std::{env, fs, path::Path};
use tracing::warn;

use crate::server::runtime_environment;

#[derive(Clone, Debug, Default)]
pub struct FileConfig {
    root: Value,
}

impl FileConfig {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_env() -> Self {
        let dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
        Self::load(Path::new(&dir), &runtime_environment())
    }

    pub fn load(dir: &Path, environment: &str) -> Self {
        let mut root = Value::Object(Map::new());
        for name in ["default.json".to_string(), format!("{}.json", environment)] {
            if let Some(layer) = read_layer(&dir.join(name)) {
                merge(&mut root, layer);
            }
        }
        Self { root }
    }

    /// Looks up a dotted key such as `mongodb.uri`. A literal key containing
    /// the dots wins over nested traversal.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.root.get(key) {
            return Some(value);
        }
        key.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

fn read_layer(path: &Path) -> Option<Value> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
            None
        }
    }
}

/// Deep merge of objects; any other value in `layer` replaces the base.
pub fn merge(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, layer) => *base = layer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_lookup() {
        let config = FileConfig::from_value(json!({
            "mongodb": { "uri": "mongodb://db:27017/mis", "options": {} }
        }));
        assert_eq!(config.get_str("mongodb.uri"), Some("mongodb://db:27017/mis"));
        assert!(config.has("mongodb.options"));
        assert!(!config.has("mongoURI"));
    }

    #[test]
    fn test_merge_overlays_nested_keys() {
        let mut base = json!({ "mongodb": { "uri": "a", "options": { "x": 1 } }, "port": 1 });
        merge(&mut base, json!({ "mongodb": { "uri": "b" } }));
        assert_eq!(base["mongodb"]["uri"], "b");
        assert_eq!(base["mongodb"]["options"]["x"], 1);
        assert_eq!(base["port"], 1);
    }

    #[test]
    fn test_missing_directory_yields_empty_config() {
        let config = FileConfig::load(Path::new("/nonexistent/schoolmis-config"), "test");
        assert!(config.get("anything").is_none());
    }
}
