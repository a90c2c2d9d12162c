//! The admin facade
//!
//! [`AdminFacade`] answers collection and document questions for the admin
//! surface. Collection shape comes from the local [`MetadataProvider`];
//! stored documents come from the [`RemoteExecutor`]. Whether a failure is
//! swallowed or returned is decided by [`AdminOperation::failure_policy`]:
//! local reads go through [`AdminOperation::apply`], remote operations
//! through [`AdminOperation::propagate`].

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};
use crate::graphql::queries::{
    COLLECTION_WITH_DOCUMENTS_QUERY, CREATE_DOCUMENT_MUTATION, DELETE_DOCUMENT_MUTATION,
    DOCUMENT_VALUES_QUERY, UPDATE_DOCUMENT_MUTATION,
};
use crate::http_executor::HttpExecutor;
use crate::metadata::{MetadataProvider, SchemaMetadata};
use crate::policy::AdminOperation;
use crate::remote::RemoteExecutor;
use crate::types::{Collection, DocumentRef, DocumentResponse, DocumentValues};

#[derive(Clone)]
pub struct AdminFacade {
    metadata: Arc<dyn MetadataProvider>,
    executor: Arc<dyn RemoteExecutor>,
    use_data_layer: bool,
}

impl std::fmt::Debug for AdminFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminFacade")
            .field("use_data_layer", &self.use_data_layer)
            .finish_non_exhaustive()
    }
}

impl AdminFacade {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        executor: Arc<dyn RemoteExecutor>,
        use_data_layer: bool,
    ) -> Self {
        Self {
            metadata,
            executor,
            use_data_layer,
        }
    }

    /// Build a facade over [`SchemaMetadata`] and [`HttpExecutor`].
    ///
    /// Without a `schema_path` the metadata starts unloaded, so local reads
    /// degrade to empty results instead of failing.
    pub fn from_config(config: &AdminConfig) -> AdminResult<Self> {
        config.validate()?;
        let metadata = match &config.schema_path {
            Some(path) => SchemaMetadata::from_file(path)?,
            None => SchemaMetadata::unloaded(),
        };
        let executor = HttpExecutor::from_config(config)?;
        log::info!(
            "Admin facade configured for {} (data layer: {})",
            config.content_api_url,
            config.use_data_layer
        );
        Ok(Self::new(
            Arc::new(metadata),
            Arc::new(executor),
            config.use_data_layer,
        ))
    }

    /// The data-layer flag captured at construction
    pub fn uses_data_layer(&self) -> bool {
        self.use_data_layer
    }

    pub async fn is_authenticated(&self) -> AdminResult<bool> {
        let result = self
            .executor
            .is_authenticated()
            .await
            .map_err(AdminError::from);
        AdminOperation::IsAuthenticated.propagate(result)
    }

    /// All collections known to local metadata, or an empty list when the
    /// metadata cannot answer.
    pub async fn fetch_collections(&self) -> AdminResult<Vec<Collection>> {
        let result = self.metadata.get_collections().map_err(AdminError::from);
        AdminOperation::FetchCollections.apply(result, Vec::new)
    }

    /// Fetch one collection.
    ///
    /// Without documents the answer comes from local metadata and `None`
    /// means the collection could not be resolved. With documents a single
    /// remote query is issued and its collection is returned as received,
    /// with the `documents` payload untouched; `None` then means the
    /// endpoint answered with a null collection.
    pub async fn fetch_collection(
        &self,
        name: &str,
        include_documents: bool,
    ) -> AdminResult<Option<Collection>> {
        if include_documents {
            let result = self.fetch_collection_with_documents(name).await;
            AdminOperation::FetchCollectionWithDocuments.propagate(result)
        } else {
            let result = self
                .metadata
                .get_collection(name)
                .map(Some)
                .map_err(AdminError::from);
            AdminOperation::FetchCollection.apply(result, || None)
        }
    }

    async fn fetch_collection_with_documents(&self, name: &str) -> AdminResult<Option<Collection>> {
        let mut variables = json!({
            "collection": name,
            "includeDocuments": true,
        });
        if let Some(sort) = self.metadata.get_sort_field_name(name) {
            variables["sort"] = Value::String(sort);
        }

        let mut response = self.run(COLLECTION_WITH_DOCUMENTS_QUERY, variables).await?;
        match response.get_mut("collection").map(Value::take) {
            Some(Value::Null) => Ok(None),
            Some(collection) => Ok(Some(serde_json::from_value(collection)?)),
            None => Err(AdminError::Serialization(
                "response is missing the collection field".to_string(),
            )),
        }
    }

    /// Fetch one document's values. The endpoint's reply is returned whole,
    /// including a null `document`.
    pub async fn fetch_document(
        &self,
        collection: &str,
        relative_path: &str,
    ) -> AdminResult<DocumentResponse> {
        let result = self.fetch_document_values(collection, relative_path).await;
        AdminOperation::FetchDocument.propagate(result)
    }

    async fn fetch_document_values(
        &self,
        collection: &str,
        relative_path: &str,
    ) -> AdminResult<DocumentResponse> {
        let response = self
            .run(
                DOCUMENT_VALUES_QUERY,
                json!({ "collection": collection, "relativePath": relative_path }),
            )
            .await?;
        Ok(DocumentResponse::from(response))
    }

    pub async fn create_document(
        &self,
        collection: &str,
        relative_path: &str,
        params: DocumentValues,
    ) -> AdminResult<Value> {
        let result = self
            .run(CREATE_DOCUMENT_MUTATION, mutation_variables(collection, relative_path, params))
            .await;
        AdminOperation::CreateDocument.propagate(result)
    }

    pub async fn update_document(
        &self,
        collection: &str,
        relative_path: &str,
        params: DocumentValues,
    ) -> AdminResult<Value> {
        let result = self
            .run(UPDATE_DOCUMENT_MUTATION, mutation_variables(collection, relative_path, params))
            .await;
        AdminOperation::UpdateDocument.propagate(result)
    }

    /// Delete a document. The endpoint's payload is discarded.
    pub async fn delete_document(&self, document: &DocumentRef) -> AdminResult<()> {
        let result = self
            .run(
                DELETE_DOCUMENT_MUTATION,
                json!({
                    "collection": document.collection,
                    "relativePath": document.relative_path,
                }),
            )
            .await
            .map(|_| ());
        AdminOperation::DeleteDocument.propagate(result)
    }

    async fn run(&self, document: &str, variables: Value) -> AdminResult<Value> {
        log::debug!("Executing remote operation with variables {}", variables);
        Ok(self.executor.execute(document, variables).await?)
    }
}

fn mutation_variables(collection: &str, relative_path: &str, params: DocumentValues) -> Value {
    json!({
        "collection": collection,
        "relativePath": relative_path,
        "params": Value::Object(params),
    })
}
