//! Configuration domain entities.
//!
//! A [`Configuration`] maps user-chosen aliases to physical monitors and
//! names arrangements of those aliases.  It is loaded wholesale from one
//! document (or synthesized from the live topology) and treated as an
//! immutable snapshot for the duration of one user action.
//!
//! Both maps keep document order: the order monitors are declared decides the
//! order they are switched off, and the order arrangements are declared is
//! the order they are offered to the user.

use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A string-keyed map that preserves insertion order.
///
/// Serializes as a plain map, so a TOML table `[monitors.left]` reads back
/// with its entries in the order they appear in the file.  Inserting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// A user-facing name for a physical monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorAlias {
    /// Hardware identifier (xrandr output name).  Need not be connected.
    pub id: String,
    /// Extra xrandr arguments appended verbatim when the monitor is enabled.
    #[serde(
        default,
        deserialize_with = "deserialize_options",
        serialize_with = "serialize_options"
    )]
    pub options: Vec<String>,
}

impl MonitorAlias {
    /// An alias for `id` with no extra options.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: Vec::new(),
        }
    }

    /// Splits `raw` on whitespace into option tokens.
    pub fn with_options(mut self, raw: &str) -> Self {
        self.options = raw.split_whitespace().map(str::to_string).collect();
        self
    }
}

/// Accepts `options = "--rotate left"` as well as `options = ["--rotate", "left"]`.
fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrTokens {
        Text(String),
        Tokens(Vec<String>),
    }

    match TextOrTokens::deserialize(deserializer)? {
        TextOrTokens::Text(s) => Ok(s.split_whitespace().map(str::to_string).collect()),
        TextOrTokens::Tokens(tokens) => Ok(tokens),
    }
}

/// Writes the tokens back as one space-joined string, the canonical form.
fn serialize_options<S>(options: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&options.join(" "))
}

/// A named, ordered subset of aliases plus a designated primary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrangement {
    /// Aliases to enable, left to right.
    #[serde(default)]
    pub enabled: Vec<String>,
    /// Alias to make primary.  Satisfiable only when it is in `enabled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
}

impl Arrangement {
    pub fn new<I, S>(enabled: I, primary: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: enabled.into_iter().map(Into::into).collect(),
            primary: primary.map(str::to_string),
        }
    }

    pub fn enables(&self, alias: &str) -> bool {
        self.enabled.iter().any(|a| a == alias)
    }

    pub fn is_primary(&self, alias: &str) -> bool {
        self.primary.as_deref() == Some(alias)
    }
}

/// Where a [`Configuration`] came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the document at this path.
    File(PathBuf),
    /// Built from the live topology because no document could be loaded.
    Generated,
    /// Constructed or parsed in memory and not yet tagged.
    #[default]
    Memory,
}

impl ConfigSource {
    pub fn is_generated(&self) -> bool {
        matches!(self, ConfigSource::Generated)
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Generated => f.write_str("auto-generated, no configuration file found"),
            ConfigSource::Memory => f.write_str("in-memory"),
        }
    }
}

/// Alias map plus named arrangements.
///
/// Unknown top-level keys in the document are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub monitors: OrderedMap<MonitorAlias>,
    #[serde(default)]
    pub arrangements: OrderedMap<Arrangement>,
    #[serde(skip)]
    pub source: ConfigSource,
}

impl Configuration {
    pub fn with_source(mut self, source: ConfigSource) -> Self {
        self.source = source;
        self
    }

    pub fn monitor(&self, alias: &str) -> Option<&MonitorAlias> {
        self.monitors.get(alias)
    }

    pub fn arrangement(&self, name: &str) -> Option<&Arrangement> {
        self.arrangements.get(name)
    }

    /// Arrangement names in document order.
    pub fn arrangement_names(&self) -> impl Iterator<Item = &str> {
        self.arrangements.keys()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
