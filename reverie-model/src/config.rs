//! Mesh configuration

use std::collections::BTreeMap;

/// Free-form key/value configuration carried by the coordinator.
///
/// The coordinator stores the attributes and logs them at startup; it does
/// not interpret them.
#[derive(Clone, Debug, Default)]
pub struct MeshConfig {
    attrs: BTreeMap<String, String>,
}

impl MeshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, builder-style.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_and_lookup() {
        let config = MeshConfig::new()
            .set("mesh_name", "aurora")
            .set("region", "dreamspace-1");

        assert_eq!(config.get("mesh_name"), Some("aurora"));
        assert_eq!(config.get("missing"), None);
        assert_eq!(config.len(), 2);
    }
}
