//! The project description document and its modules.
//!
//! Every scalar is optional in memory: a document is loaded as-is and the
//! `SchemaValidator` decides what is missing or malformed. Field names are
//! camelCase on the wire and on disk.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::value_objects::ModuleKind;

/// The unit of configuration: everything the generation service needs to
/// know about one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Order is significant: it drives generation output ordering.
    #[serde(
        default,
        deserialize_with = "lenient_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub modules: Option<Vec<ModuleDescription>>,

    #[serde(
        default,
        deserialize_with = "lenient_string_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub environments: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ProjectDescription {
    /// Start a description with the three required identity fields and an
    /// empty module list.
    pub fn new(
        project_name: impl Into<String>,
        domain: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            project_name: Some(project_name.into()),
            domain: Some(domain.into()),
            owner: Some(owner.into()),
            modules: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a module, keeping insertion order.
    pub fn with_module(mut self, module: ModuleDescription) -> Self {
        self.modules.get_or_insert_with(Vec::new).push(module);
        self
    }

    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = Some(environments.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Project name, or `""` when absent.
    pub fn name(&self) -> &str {
        self.project_name.as_deref().unwrap_or_default()
    }

    /// Modules in document order; empty when absent.
    pub fn module_list(&self) -> &[ModuleDescription] {
        self.modules.as_deref().unwrap_or_default()
    }
}

/// One unit of generated functionality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescription {
    /// Raw kind string; parsed against [`ModuleKind`] by the validator so an
    /// unknown kind is reported rather than rejected by the parser.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub module_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub module_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub layers: Option<Vec<String>>,

    /// Module-specific parameters; opaque to validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_values: Option<BTreeMap<String, Value>>,
}

impl ModuleDescription {
    pub fn new(
        kind: ModuleKind,
        module_type: impl Into<String>,
        module_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            module_type: Some(module_type.into()),
            module_id: Some(module_id.into()),
            ..Self::default()
        }
    }

    pub fn with_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers = Some(layers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_field_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field_values
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// The parsed kind, if present and inside the closed set.
    pub fn parsed_kind(&self) -> Option<ModuleKind> {
        self.kind.as_deref().and_then(|k| k.parse().ok())
    }
}

/// Any YAML/JSON scalar, kept as its textual form so the validator can
/// judge it. Mappings and sequences fall through to `Other`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::UInt(n) => Some(n.to_string()),
            Scalar::Float(n) => Some(n.to_string()),
            Scalar::Other(_) => None,
        }
    }
}

/// A string field that also takes numbers and booleans (`moduleId: 123`).
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_text))
}

/// A sequence of strings whose scalar items are stringified; non-scalar
/// items are dropped.
fn lenient_string_sequence<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = lenient_sequence::<D, Scalar>(deserializer)?;
    Ok(items.map(|items| items.into_iter().filter_map(Scalar::into_text).collect()))
}

/// Accept a sequence; treat any other shape (scalar, mapping, null) as absent.
///
/// Elements are read straight from the source deserializer, so a malformed
/// element keeps its line and column in the error.
fn lenient_sequence<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_any(SequenceOrAbsent(PhantomData))
}

struct SequenceOrAbsent<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for SequenceOrAbsent<T> {
    type Value = Option<Vec<T>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Some(items))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(None)
    }
}
