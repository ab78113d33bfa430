//! Chunk data model and its source-file representation.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use crate::config::Config;
use crate::core::markup::PROTO_KEY;
use crate::error::{ResxError, Result, ValidationError};

/// Configured, ordered language codes with the designated default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    languages: Vec<String>,
    default: String,
}

impl LanguageSet {
    /// Callers are expected to pass a validated configuration, which
    /// guarantees `default` is one of `languages`.
    pub fn new(languages: Vec<String>, default: impl Into<String>) -> Self {
        Self {
            languages,
            default: default.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.languages.clone(), config.default_lang.clone())
    }

    pub fn default_lang(&self) -> &str {
        &self.default
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(String::as_str)
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.languages.iter().any(|l| l == lang)
    }

    fn position(&self, lang: &str) -> Option<usize> {
        self.languages.iter().position(|l| l == lang)
    }
}

/// Language code -> value.
pub type LanguageValues = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: String,
    pub values: LanguageValues,
}

impl KeyEntry {
    /// Value for `lang`, falling back to the default language.
    pub fn resolve<'a>(&'a self, lang: &str, languages: &LanguageSet) -> Option<&'a str> {
        self.values
            .get(lang)
            .or_else(|| self.values.get(languages.default_lang()))
            .map(String::as_str)
    }
}

/// A named group of key entries in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub name: String,
    pub entries: Vec<KeyEntry>,
}

impl Chunk {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&KeyEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parse the JSON source of a chunk. Only the shape is checked here;
    /// language invariants are checked by [`Chunk::validate`].
    pub fn from_source(name: &str, content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::empty(name));
        }

        let root: Value = serde_json::from_str(content)
            .map_err(|err| ResxError::invalid_source(name, format!("malformed JSON: {}", err)))?;
        let Value::Object(root) = root else {
            return Err(ResxError::invalid_source(
                name,
                "root of a resource file must be an object",
            ));
        };

        let mut entries = Vec::with_capacity(root.len());
        for (key, value) in root {
            let Value::Object(value_map) = value else {
                return Err(ResxError::invalid_source(
                    name,
                    format!("key '{}' must map languages to values", key),
                ));
            };

            let mut values = LanguageValues::new();
            for (lang, value) in value_map {
                let Value::String(value) = value else {
                    return Err(ResxError::invalid_source(
                        name,
                        format!("value of '{}' for '{}' must be a string", key, lang),
                    ));
                };
                values.insert(lang, value);
            }
            entries.push(KeyEntry { key, values });
        }

        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }

    /// Serialize to the canonical source representation: `tab_size`
    /// indentation, configured languages first, trailing newline.
    pub fn to_source(&self, languages: &LanguageSet, tab_size: usize) -> Result<String> {
        let mut root = Map::new();
        for entry in &self.entries {
            let mut ordered: Vec<(&String, &String)> = entry.values.iter().collect();
            ordered.sort_by(|(a, _), (b, _)| {
                let rank = |lang: &str| languages.position(lang).unwrap_or(usize::MAX);
                rank(a.as_str()).cmp(&rank(b.as_str())).then_with(|| a.cmp(b))
            });

            let value_map: Map<String, Value> = ordered
                .into_iter()
                .map(|(lang, value)| (lang.clone(), Value::String(value.clone())))
                .collect();
            root.insert(entry.key.clone(), Value::Object(value_map));
        }

        let indent = " ".repeat(tab_size);
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        Value::Object(root)
            .serialize(&mut serializer)
            .map_err(|err| ResxError::invalid_source(&self.name, err.to_string()))?;

        let mut content = String::from_utf8(buf)
            .map_err(|err| ResxError::invalid_source(&self.name, err.to_string()))?;
        content.push('\n');
        Ok(content)
    }

    /// Check that every key name is valid, every entry carries a
    /// default-language value and no value is empty.
    pub fn validate(&self, languages: &LanguageSet) -> Result<()> {
        for entry in &self.entries {
            validate_key_name(&entry.key)
                .map_err(|err| ResxError::invalid_source(&self.name, err.to_string()))?;
            if !entry.values.contains_key(languages.default_lang()) {
                return Err(ResxError::invalid_source(
                    &self.name,
                    format!(
                        "key '{}' has no value for default language '{}'",
                        entry.key,
                        languages.default_lang()
                    ),
                ));
            }
            if let Some((lang, _)) = entry.values.iter().find(|(_, value)| value.is_empty()) {
                return Err(ResxError::invalid_source(
                    &self.name,
                    format!("key '{}' has an empty '{}' value", entry.key, lang),
                ));
            }
        }
        Ok(())
    }
}

/// Chunk names become file names and JS property names.
pub fn validate_chunk_name(name: &str) -> Result<(), ValidationError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.starts_with('.') {
        Some("name cannot start with '.'")
    } else if name.contains(['/', '\\']) {
        Some("name cannot contain path separators")
    } else if name.contains('.') {
        Some("name cannot contain '.'")
    } else if name.contains('=') {
        Some("name cannot contain '='")
    } else if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("name cannot contain whitespace or control characters")
    } else if name == PROTO_KEY {
        Some("name is reserved")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationError::InvalidChunkName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Key names stay flat: no `.` hierarchy, nothing that breaks a `key=value` line.
pub fn validate_key_name(name: &str) -> Result<(), ValidationError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.contains('.') {
        Some("name cannot contain '.'")
    } else if name.contains('=') {
        Some("name cannot contain '='")
    } else if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("name cannot contain whitespace or control characters")
    } else if name == PROTO_KEY {
        Some("name is reserved")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationError::InvalidKeyName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
