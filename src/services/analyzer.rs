//! JSON structure analysis service
//!
//! Derives a depth-bounded description of a JSON document's shape for quick
//! inspection without reading the full payload, and provides best-effort
//! pretty printing of raw response bodies

use crate::utils::error::AppResult;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Characters of a string value kept verbatim in a field sample
const SAMPLE_LIMIT: usize = 50;

/// Marker appended to a sample when the original value was cut
const TRUNCATION_MARKER: &str = "...";

/// Levels of nested field detail below the root (deeper structure is
/// flattened into a bare type tag)
const NESTED_DETAIL_LEVELS: usize = 1;

/// Type tag of a JSON node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl JsonType {
    fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => JsonType::Object,
            Value::Array(_) => JsonType::Array,
            Value::String(_) => JsonType::String,
            Value::Number(_) => JsonType::Number,
            Value::Bool(_) => JsonType::Boolean,
            Value::Null => JsonType::Null,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

/// Field name to field info mapping, preserving document order
///
/// Serializes as a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(pub Vec<(String, FieldInfo)>);

impl Fields {
    pub fn get(&self, name: &str) -> Option<&FieldInfo> {
        self.0
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, info)| info)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, info) in &self.0 {
            map.serialize_entry(name, info)?;
        }
        map.end()
    }
}

/// Shape metadata for one object field
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// Type tag of the field value
    #[serde(rename = "type")]
    pub kind: JsonType,

    /// Truncated sample for string values, textual form for numbers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_value: Option<String>,

    /// Full original length (in characters) of a string value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    /// Element count of an array value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_size: Option<usize>,

    /// Type tag of an array value's first element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<JsonType>,

    /// One level of field detail for an array whose first element is an object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_fields: Option<Fields>,

    /// One level of field detail for an object value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested_fields: Option<Fields>,
}

impl FieldInfo {
    fn leaf(kind: JsonType) -> Self {
        Self {
            kind,
            sample_value: None,
            length: None,
            array_size: None,
            element_type: None,
            element_fields: None,
            nested_fields: None,
        }
    }
}

/// Shape metadata for an array root
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArrayInfo {
    /// Element count
    pub size: usize,

    /// Type tag of the first element, or `"empty"` for an empty array
    pub element_type: &'static str,

    /// Field detail of the first element when it is an object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_element_fields: Option<Fields>,
}

/// Structural description of one JSON document
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    /// Type tag of the root node
    #[serde(rename = "type")]
    pub kind: JsonType,

    /// Per-field detail for object roots, in document order
    pub fields: Fields,

    /// Size and element detail for array roots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_info: Option<ArrayInfo>,

    /// Top-level element or field count (1 for scalar roots)
    pub sample_size: usize,

    /// True nesting depth, 1 for a leaf value
    pub depth: usize,
}

/// Analysis result that serializes either the report or the failure cause
///
/// Embedded in exploration results, where an unparseable body must be
/// reported inline rather than failing the call.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StructureOutcome {
    Report(StructureReport),
    Failed { error: String },
}

/// Analyze the structure of a JSON document
///
/// Returns an error value (never panics) when the input fails to parse.
pub fn analyze(json: &str) -> AppResult<StructureReport> {
    let root: Value = serde_json::from_str(json)?;
    Ok(report_of(&root))
}

/// Analyze a JSON document, folding parse failures into the outcome
pub fn analyze_outcome(json: &str) -> StructureOutcome {
    match analyze(json) {
        Ok(report) => StructureOutcome::Report(report),
        Err(error) => {
            warn!("Failed to analyze JSON structure: {}", error);
            StructureOutcome::Failed {
                error: error.to_string(),
            }
        }
    }
}

/// Re-serialize valid JSON with indentation
///
/// Returns the input unchanged when it is not valid JSON; callers must treat
/// this as cosmetic formatting, never validation.
pub fn pretty_print(json: &str) -> String {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| json.to_string()),
        Err(error) => {
            warn!("Failed to pretty print JSON, returning original: {}", error);
            json.to_string()
        }
    }
}

fn report_of(root: &Value) -> StructureReport {
    let (fields, array_info) = match root {
        Value::Object(map) => (fields_of(map, NESTED_DETAIL_LEVELS), None),
        Value::Array(items) => (Fields::default(), Some(array_info_of(items))),
        _ => (Fields::default(), None),
    };

    StructureReport {
        kind: JsonType::of(root),
        fields,
        array_info,
        sample_size: sample_size_of(root),
        depth: depth_of(root),
    }
}

fn fields_of(map: &serde_json::Map<String, Value>, levels_left: usize) -> Fields {
    Fields(
        map.iter()
            .map(|(name, value)| (name.clone(), field_info_of(value, levels_left)))
            .collect(),
    )
}

fn field_info_of(value: &Value, levels_left: usize) -> FieldInfo {
    let mut info = FieldInfo::leaf(JsonType::of(value));

    match value {
        Value::String(text) => {
            info.sample_value = Some(sample_of(text));
            info.length = Some(text.chars().count());
        }
        Value::Number(number) => {
            info.sample_value = Some(number.to_string());
        }
        Value::Array(items) => {
            info.array_size = Some(items.len());
            if let Some(first) = items.first() {
                info.element_type = Some(JsonType::of(first));
                if let (Value::Object(map), true) = (first, levels_left > 0) {
                    info.element_fields = Some(fields_of(map, levels_left - 1));
                }
            }
        }
        Value::Object(map) => {
            if levels_left > 0 {
                info.nested_fields = Some(fields_of(map, levels_left - 1));
            }
        }
        _ => {}
    }

    info
}

fn array_info_of(items: &[Value]) -> ArrayInfo {
    match items.first() {
        Some(first) => ArrayInfo {
            size: items.len(),
            element_type: JsonType::of(first).as_str(),
            first_element_fields: match first {
                Value::Object(map) => Some(fields_of(map, NESTED_DETAIL_LEVELS)),
                _ => None,
            },
        },
        None => ArrayInfo {
            size: 0,
            element_type: "empty",
            first_element_fields: None,
        },
    }
}

/// Keep up to `SAMPLE_LIMIT` characters verbatim, marking any cut
fn sample_of(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SAMPLE_LIMIT).collect();

    if chars.next().is_some() {
        format!("{}{}", head, TRUNCATION_MARKER)
    } else {
        head
    }
}

fn sample_size_of(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 1,
    }
}

/// True nesting depth of the document, unlike the level-capped field detail
fn depth_of(value: &Value) -> usize {
    match value {
        Value::Object(map) => 1 + map.values().map(depth_of).max().unwrap_or(0),
        Value::Array(items) => 1 + items.iter().map(depth_of).max().unwrap_or(0),
        _ => 1,
    }
}
