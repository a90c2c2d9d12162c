//! Local schema metadata
//!
//! [`MetadataProvider`] is the synchronous capability the facade consults for
//! collection shape. [`SchemaMetadata`] implements it over a schema
//! definition held in memory, typically loaded from a JSON file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::types::Collection;

/// Answers questions about collection shape without touching the network
pub trait MetadataProvider: Send + Sync {
    /// All collections, in declaration order
    fn get_collections(&self) -> Result<Vec<Collection>, SchemaError>;

    /// A single collection by name
    fn get_collection(&self, name: &str) -> Result<Collection, SchemaError>;

    /// Name of the field documents of this collection are sorted by, if the
    /// collection declares a title field
    fn get_sort_field_name(&self, collection_name: &str) -> Option<String>;
}

/// A field declared on a collection or template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_title: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// One shape variant of a multi-template collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<TemplateDefinition>,
}

impl CollectionDefinition {
    fn to_collection(&self) -> Result<Collection, SchemaError> {
        let fields = non_empty_value(&self.fields)?;
        let templates = non_empty_value(&self.templates)?;
        Ok(Collection {
            name: self.name.clone(),
            label: self.label.clone(),
            path: self.path.clone(),
            format: self.format.clone(),
            fields,
            templates,
            documents: None,
            extra: Map::new(),
        })
    }

    /// Title fields only count on single-shape collections and must be strings
    fn title_field(&self) -> Option<&FieldDefinition> {
        self.fields
            .iter()
            .find(|field| field.is_title && field.field_type == "string")
    }
}

fn non_empty_value<T: Serialize>(items: &[T]) -> Result<Option<Value>, SchemaError> {
    if items.is_empty() {
        return Ok(None);
    }
    serde_json::to_value(items)
        .map(Some)
        .map_err(|e| SchemaError::InvalidDefinition(e.to_string()))
}

/// Top-level schema document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub collections: Vec<CollectionDefinition>,
}

impl SchemaDefinition {
    /// Reject definitions the provider could not answer consistently
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for collection in &self.collections {
            if collection.name.trim().is_empty() {
                return Err(SchemaError::InvalidDefinition(
                    "collection name must not be empty".to_string(),
                ));
            }
            if !seen.insert(collection.name.as_str()) {
                return Err(SchemaError::InvalidDefinition(format!(
                    "duplicate collection name: {}",
                    collection.name
                )));
            }
        }
        Ok(())
    }
}

/// [`MetadataProvider`] backed by an in-memory schema definition
#[derive(Debug, Clone, Default)]
pub struct SchemaMetadata {
    schema: Option<SchemaDefinition>,
}

impl SchemaMetadata {
    /// Create a provider over an already validated definition
    pub fn new(schema: SchemaDefinition) -> Result<Self, SchemaError> {
        schema.validate()?;
        Ok(Self {
            schema: Some(schema),
        })
    }

    /// A provider with no schema loaded; every lookup fails as unavailable
    pub fn unloaded() -> Self {
        Self { schema: None }
    }

    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let schema: SchemaDefinition = serde_json::from_value(value)
            .map_err(|e| SchemaError::InvalidDefinition(e.to_string()))?;
        Self::new(schema)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let schema: SchemaDefinition = serde_json::from_str(json)
            .map_err(|e| SchemaError::InvalidDefinition(e.to_string()))?;
        Self::new(schema)
    }

    /// Load a schema definition from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SchemaError::Unavailable(format!("failed to read {}: {}", path.display(), e))
        })?;
        log::info!("Loaded schema definition from {}", path.display());
        Self::from_json_str(&contents)
    }

    pub fn is_loaded(&self) -> bool {
        self.schema.is_some()
    }

    fn schema(&self) -> Result<&SchemaDefinition, SchemaError> {
        self.schema
            .as_ref()
            .ok_or_else(|| SchemaError::Unavailable("schema has not been loaded".to_string()))
    }

    fn definition(&self, name: &str) -> Result<&CollectionDefinition, SchemaError> {
        self.schema()?
            .collections
            .iter()
            .find(|collection| collection.name == name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }
}

impl MetadataProvider for SchemaMetadata {
    fn get_collections(&self) -> Result<Vec<Collection>, SchemaError> {
        self.schema()?
            .collections
            .iter()
            .map(CollectionDefinition::to_collection)
            .collect()
    }

    fn get_collection(&self, name: &str) -> Result<Collection, SchemaError> {
        self.definition(name)?.to_collection()
    }

    fn get_sort_field_name(&self, collection_name: &str) -> Option<String> {
        self.definition(collection_name)
            .ok()?
            .title_field()
            .map(|field| field.name.clone())
    }
}
