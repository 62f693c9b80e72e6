//! Policy and preset mapping.
//!
//! Callers name a desired output format by *policy*; the transcoding
//! service knows *presets*. An optional alias table maps policy names to
//! canonical preset names, and the preset catalog (fetched once at startup)
//! maps preset names to provider preset ids. Both directions are needed:
//! forward at submission, inverse at completion.

use std::collections::HashMap;

use serde::Deserialize;

/// Alias table from caller policy names to canonical preset names.
///
/// A policy with no alias entry is tried directly as a preset name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PolicyMap {
    aliases: HashMap<String, String>,
}

impl PolicyMap {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Parse from a JSON object of `policy name -> preset name`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Preset name for a policy: the alias if one exists, else the policy
    /// name itself.
    pub fn preset_name<'a>(&'a self, policy: &'a str) -> &'a str {
        self.aliases.get(policy).map(String::as_str).unwrap_or(policy)
    }

    /// Inverse lookup: policy name for a preset name, falling back to the
    /// preset name itself when no alias points at it.
    pub fn policy_name<'a>(&'a self, preset_name: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(_, preset)| preset.as_str() == preset_name)
            .map(|(policy, _)| policy.as_str())
            .unwrap_or(preset_name)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Provider preset catalog, indexed both ways.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    by_name: HashMap<String, String>,
    by_id: HashMap<String, String>,
}

impl PresetCatalog {
    /// Build a catalog from `(name, id)` pairs as listed by the provider.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut by_name = HashMap::new();
        let mut by_id = HashMap::new();
        for (name, id) in entries {
            by_name.insert(name.clone(), id.clone());
            by_id.insert(id, name);
        }
        Self { by_name, by_id }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn name_for_id(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Resolve a caller policy to a preset id.
    ///
    /// Returns `None` when nothing matches; the caller decides whether to
    /// skip the output. This is an explicit absence, not an error.
    pub fn resolve(&self, policies: &PolicyMap, policy: &str) -> Option<&str> {
        self.id_for_name(policies.preset_name(policy))
    }

    /// Inverse resolution at completion time: preset id back to a policy
    /// name. `None` when the preset id is not in the catalog.
    pub fn policy_for_preset_id(&self, policies: &PolicyMap, preset_id: &str) -> Option<String> {
        self.name_for_id(preset_id)
            .map(|name| policies.policy_name(name).to_string())
    }
}
