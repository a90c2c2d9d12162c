use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Open-ended field values of a document, keyed by field name
pub type DocumentValues = Map<String, Value>;

/// A logical content type as seen by the admin surface.
///
/// Collections sourced from local metadata carry `path` and `fields`;
/// collections returned by the remote endpoint carry `documents` when they
/// were requested. The `documents` payload and any attribute this type does
/// not name are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique collection name
    pub name: String,

    /// Human readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Storage location of the collection's documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// On-disk format, e.g. `md` or `json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Field definitions for single-shape collections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,

    /// Shape variants for multi-template collections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Value>,

    /// Documents connection, present only when explicitly requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Value>,

    /// Attributes not named above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    /// Create a collection with only a name set
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            path: None,
            format: None,
            fields: None,
            templates: None,
            documents: None,
            extra: Map::new(),
        }
    }

    /// `documents.totalCount`, when present and numeric
    pub fn document_count(&self) -> Option<u64> {
        self.documents.as_ref()?.get("totalCount")?.as_u64()
    }

    /// Structural metadata of every listed document, in server order.
    ///
    /// Edges without a readable `_sys` yield a default entry rather than
    /// an error, so the list always has one entry per edge.
    pub fn document_summaries(&self) -> Vec<DocumentSys> {
        self.documents
            .as_ref()
            .and_then(|documents| documents.get("edges"))
            .and_then(Value::as_array)
            .map(|edges| edges.iter().map(DocumentSys::from_edge).collect())
            .unwrap_or_default()
    }
}

/// Structural metadata of a stored document.
///
/// Read leniently: missing or null members fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSys {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub breadcrumbs: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relative_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extension: String,
}

impl DocumentSys {
    /// Read `node._sys` from one connection edge
    pub fn from_edge(edge: &Value) -> Self {
        edge.get("node")
            .and_then(|node| node.get("_sys"))
            .and_then(|sys| serde_json::from_value(sys.clone()).ok())
            .unwrap_or_default()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response wrapper returned when fetching one document's values.
///
/// Holds the endpoint's reply unmodified; accessors read into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentResponse(Value);

impl DocumentResponse {
    /// The `document` member, unless missing or null
    pub fn document(&self) -> Option<&Value> {
        self.0.get("document").filter(|document| !document.is_null())
    }

    /// The document's `_values` payload, when it is an object
    pub fn values(&self) -> Option<&DocumentValues> {
        self.document()?.get("_values")?.as_object()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for DocumentResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Identifies one document within a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub collection: String,
    pub relative_path: String,
}

impl DocumentRef {
    pub fn new(collection: &str, relative_path: &str) -> Self {
        Self {
            collection: collection.to_string(),
            relative_path: relative_path.to_string(),
        }
    }
}
