//! Substitutable collaborators for tests
//!
//! [`MockExecutor`] replays queued results and records every call it
//! receives. [`MockMetadata`] serves a fixed list of collections or fails
//! every lookup with a configured error.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{SchemaError, TransportError};
use crate::metadata::MetadataProvider;
use crate::remote::RemoteExecutor;
use crate::types::Collection;

/// One `execute` call observed by a [`MockExecutor`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub document: String,
    pub variables: Value,
}

#[derive(Debug)]
pub struct MockExecutor {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    authenticated: Mutex<Result<bool, TransportError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            authenticated: Mutex::new(Ok(true)),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for the next `execute` call
    pub fn respond_with(self, response: Value) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queue a failure for the next `execute` call
    pub fn fail_with(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    /// Set the answer of `is_authenticated`
    pub fn authenticated(self, result: Result<bool, TransportError>) -> Self {
        *self.authenticated.lock().unwrap_or_else(|e| e.into_inner()) = result;
        self
    }

    pub fn push(&self, result: Result<Value, TransportError>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(result);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl RemoteExecutor for MockExecutor {
    async fn is_authenticated(&self) -> Result<bool, TransportError> {
        self.authenticated
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn execute(&self, document: &str, variables: Value) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                document: document.to_string(),
                variables,
            });
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no mock response queued".to_string())))
    }
}

#[derive(Debug, Default)]
pub struct MockMetadata {
    collections: Vec<Collection>,
    sort_fields: HashMap<String, String>,
    failure: Option<SchemaError>,
}

impl MockMetadata {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            collections,
            ..Self::default()
        }
    }

    /// A provider whose every lookup fails with `error`
    pub fn failing(error: SchemaError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Declare `field` as the title field of `collection`
    pub fn with_sort_field(mut self, collection: &str, field: &str) -> Self {
        self.sort_fields
            .insert(collection.to_string(), field.to_string());
        self
    }

    fn check(&self) -> Result<(), SchemaError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl MetadataProvider for MockMetadata {
    fn get_collections(&self) -> Result<Vec<Collection>, SchemaError> {
        self.check()?;
        Ok(self.collections.clone())
    }

    fn get_collection(&self, name: &str) -> Result<Collection, SchemaError> {
        self.check()?;
        self.collections
            .iter()
            .find(|collection| collection.name == name)
            .cloned()
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    fn get_sort_field_name(&self, collection_name: &str) -> Option<String> {
        self.sort_fields.get(collection_name).cloned()
    }
}
