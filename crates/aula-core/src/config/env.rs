//! Environment lookup used for credentials and endpoint overrides

use std::collections::HashMap;
use std::sync::Arc;

/// Where environment-style settings are read from
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// The process environment
    #[default]
    Process,
    /// A fixed snapshot (tests, embedded deployments)
    Fixed(Arc<HashMap<String, String>>),
}

impl EnvSource {
    /// Build a fixed source from key/value pairs
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(Arc::new(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Trimmed, non-empty value for `key`
    pub fn get(&self, key: &str) -> Option<String> {
        let raw = match self {
            EnvSource::Process => std::env::var(key).ok(),
            EnvSource::Fixed(vars) => vars.get(key).cloned(),
        }?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// First non-empty value among `keys`, with the key that supplied it
    pub fn first_of<'k>(&self, keys: &[&'k str]) -> Option<(&'k str, String)> {
        keys.iter()
            .find_map(|key| self.get(key).map(|value| (*key, value)))
    }

    /// Snapshot for the `config` crate's environment source
    pub(crate) fn as_map(&self) -> Option<HashMap<String, String>> {
        match self {
            EnvSource::Process => None,
            EnvSource::Fixed(vars) => Some(vars.as_ref().clone()),
        }
    }
}
