//! Value types exchanged with the host and produced by normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag reported by the host for a serialized value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Int2,
    Float,
    Float2,
    Float3,
    Float4,
    ColorRgba,
    Bool,
    String,
    Texture,
    Enum,
    Array,
    /// Any class name this plugin does not decode
    Other(std::string::String),
}

impl ValueKind {
    /// Map a host value class name onto a kind
    pub fn from_class_name(class_name: &str) -> Self {
        match class_name {
            "SDValueInt" => ValueKind::Int,
            "SDValueInt2" => ValueKind::Int2,
            "SDValueFloat" => ValueKind::Float,
            "SDValueFloat2" => ValueKind::Float2,
            "SDValueFloat3" => ValueKind::Float3,
            "SDValueFloat4" => ValueKind::Float4,
            "SDValueColorRGBA" => ValueKind::ColorRgba,
            "SDValueBool" => ValueKind::Bool,
            "SDValueString" => ValueKind::String,
            "SDValueTexture" => ValueKind::Texture,
            "SDValueEnum" => ValueKind::Enum,
            "SDValueArray" => ValueKind::Array,
            other => ValueKind::Other(other.to_string()),
        }
    }

    /// Opening wrapper tokens of the serialized text, closed by `))`
    pub fn wrapper(&self) -> Option<&'static str> {
        match self {
            ValueKind::Int => Some("SDValueInt(int("),
            ValueKind::Int2 => Some("SDValueInt2(int2("),
            ValueKind::Float => Some("SDValueFloat(float("),
            ValueKind::Float2 => Some("SDValueFloat2(float2("),
            ValueKind::Float3 => Some("SDValueFloat3(float3("),
            ValueKind::Float4 => Some("SDValueFloat4(float4("),
            ValueKind::ColorRgba => Some("SDValueColorRGBA(ColorRGBA("),
            ValueKind::Bool => Some("SDValueBool(bool("),
            ValueKind::String => Some("SDValueString(string("),
            ValueKind::Texture => Some("SDValueTexture(SDTexture("),
            ValueKind::Array => Some("SDValueArray(SDValueStruct("),
            ValueKind::Enum | ValueKind::Other(_) => None,
        }
    }
}

/// One entry of an enumeration type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumerator {
    /// Symbolic identifier, e.g. `no_tiling`
    pub id: String,
    /// Selection index stored in property values
    pub value: i64,
}

impl Enumerator {
    pub fn new(id: impl Into<String>, value: i64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// A property value as handed over by the host
///
/// `text` is the host serializer output, e.g.
/// `SDValueFloat2(float2(0.17365,0.3249))`. Enum-typed values also carry
/// their type's enumerator table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawValue {
    pub class_name: String,
    pub text: String,
    #[serde(default)]
    pub enumerators: Vec<Enumerator>,
}

impl RawValue {
    pub fn new(class_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            text: text.into(),
            enumerators: Vec::new(),
        }
    }

    /// An enum value with its type's enumerator table
    pub fn enumeration(text: impl Into<String>, enumerators: Vec<Enumerator>) -> Self {
        Self {
            class_name: "SDValueEnum".to_string(),
            text: text.into(),
            enumerators,
        }
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::from_class_name(&self.class_name)
    }

    /// Symbolic name of the enumerator with the given index
    pub fn enumerator_name(&self, index: i64) -> Option<&str> {
        self.enumerators
            .iter()
            .find(|e| e.value == index)
            .map(|e| e.id.as_str())
    }
}

/// Canonical, display-ready property value
///
/// Float components are already rounded and re-stringified, so equality is
/// equality of what the user reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    Integer(String),
    IntPair([String; 2]),
    Float(String),
    FloatPair([String; 2]),
    FloatTriple([String; 3]),
    FloatQuad([String; 4]),
    ColorRgba([String; 4]),
    Boolean(String),
    Text(String),
    Enum(String),
    Texture(String),
    /// Nested array-of-struct value (gradients, curves)
    Graph,
    /// Serialized form not recognised
    Unknown,
}

impl PropertyValue {
    /// The single text of scalar variants; `None` for tuples and markers
    pub fn scalar_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Integer(s)
            | PropertyValue::Float(s)
            | PropertyValue::Boolean(s)
            | PropertyValue::Text(s)
            | PropertyValue::Enum(s)
            | PropertyValue::Texture(s) => Some(s),
            _ => None,
        }
    }

    /// Replace the text of a scalar variant, keeping the variant
    pub fn with_scalar_text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        match self {
            PropertyValue::Integer(_) => PropertyValue::Integer(text),
            PropertyValue::Float(_) => PropertyValue::Float(text),
            PropertyValue::Boolean(_) => PropertyValue::Boolean(text),
            PropertyValue::Text(_) => PropertyValue::Text(text),
            PropertyValue::Enum(_) => PropertyValue::Enum(text),
            PropertyValue::Texture(_) => PropertyValue::Texture(text),
            other => other,
        }
    }

    /// Display components in order
    pub fn components(&self) -> Vec<&str> {
        match self {
            PropertyValue::IntPair(c) | PropertyValue::FloatPair(c) => {
                c.iter().map(String::as_str).collect()
            }
            PropertyValue::FloatTriple(c) => c.iter().map(String::as_str).collect(),
            PropertyValue::FloatQuad(c) | PropertyValue::ColorRgba(c) => {
                c.iter().map(String::as_str).collect()
            }
            PropertyValue::Graph => vec!["GRAPH"],
            PropertyValue::Unknown => vec!["UNKNOWN"],
            scalar => scalar.scalar_text().into_iter().collect(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components().join(", "))
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        PropertyValue::Text(text.to_string())
    }
}
