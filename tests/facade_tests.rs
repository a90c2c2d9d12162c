use std::sync::Arc;

use content_admin::graphql::queries::{
    COLLECTION_WITH_DOCUMENTS_QUERY, CREATE_DOCUMENT_MUTATION, DELETE_DOCUMENT_MUTATION,
    DOCUMENT_VALUES_QUERY, UPDATE_DOCUMENT_MUTATION,
};
use content_admin::{
    AdminError, AdminFacade, Collection, DocumentRef, DocumentValues,
    MockExecutor, MockMetadata, SchemaError, SchemaMetadata, TransportError,
};
use serde_json::{json, Value};

fn posts_and_pages() -> MockMetadata {
    MockMetadata::new(vec![Collection::named("posts"), Collection::named("pages")])
        .with_sort_field("posts", "title")
}

fn facade(metadata: MockMetadata, executor: Arc<MockExecutor>) -> AdminFacade {
    AdminFacade::new(Arc::new(metadata), executor, false)
}

fn params(value: Value) -> DocumentValues {
    value.as_object().cloned().expect("params must be an object")
}

fn collection_response() -> Value {
    json!({
        "collection": {
            "name": "posts",
            "label": "Blog Posts",
            "format": "md",
            "templates": null,
            "documents": {
                "totalCount": 2,
                "edges": [
                    {
                        "node": {
                            "_sys": {
                                "title": "Zebra",
                                "template": "post",
                                "breadcrumbs": ["zebra"],
                                "path": "content/posts/zebra.md",
                                "basename": "zebra.md",
                                "relativePath": "zebra.md",
                                "filename": "zebra",
                                "extension": ".md"
                            }
                        }
                    },
                    {
                        "node": {
                            "_sys": {
                                "title": "Apple",
                                "template": "post",
                                "breadcrumbs": ["nested", "apple"],
                                "path": "content/posts/nested/apple.md",
                                "basename": "apple.md",
                                "relativePath": "nested/apple.md",
                                "filename": "apple",
                                "extension": ".md"
                            }
                        }
                    }
                ]
            }
        }
    })
}

#[tokio::test]
async fn test_fetch_collections_returns_provider_order() {
    let executor = Arc::new(MockExecutor::new());
    let admin = facade(posts_and_pages(), executor.clone());

    let collections = admin.fetch_collections().await.unwrap();
    let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["posts", "pages"]);
    assert_eq!(executor.call_count(), 0, "listing collections is local only");
}

#[tokio::test]
async fn test_fetch_collections_recovers_when_metadata_fails() {
    let admin = facade(
        MockMetadata::failing(SchemaError::Unavailable("schema not built".to_string())),
        Arc::new(MockExecutor::new()),
    );

    let collections = admin.fetch_collections().await.unwrap();
    assert!(collections.is_empty());
}

#[tokio::test]
async fn test_fetch_collection_without_documents_is_local() {
    let executor = Arc::new(MockExecutor::new());
    let admin = facade(posts_and_pages(), executor.clone());

    let collection = admin.fetch_collection("pages", false).await.unwrap();
    assert_eq!(collection, Some(Collection::named("pages")));
    assert_eq!(executor.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_collection_gives_not_found_sentinel() {
    let admin = facade(posts_and_pages(), Arc::new(MockExecutor::new()));

    for name in ["missing", "", "Posts", "posts/"] {
        let collection = admin.fetch_collection(name, false).await.unwrap();
        assert_eq!(collection, None, "{name:?} should not resolve");
    }
}

#[tokio::test]
async fn test_sentinel_differs_from_collection_without_documents() {
    let mut empty = Collection::named("drafts");
    empty.documents = Some(json!({ "totalCount": 0, "edges": [] }));
    let admin = facade(MockMetadata::new(vec![empty.clone()]), Arc::new(MockExecutor::new()));

    assert_eq!(admin.fetch_collection("drafts", false).await.unwrap(), Some(empty));
    assert_eq!(admin.fetch_collection("missing", false).await.unwrap(), None);
}

#[tokio::test]
async fn test_fetch_collection_with_documents_issues_one_query() {
    let response = collection_response();
    let executor = Arc::new(MockExecutor::new().respond_with(response.clone()));
    let admin = facade(posts_and_pages(), executor.clone());

    let collection = admin
        .fetch_collection("posts", true)
        .await
        .unwrap()
        .expect("collection should be present");

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].document, COLLECTION_WITH_DOCUMENTS_QUERY);
    assert_eq!(
        calls[0].variables,
        json!({ "collection": "posts", "includeDocuments": true, "sort": "title" })
    );

    // Documents come back exactly as the endpoint ordered them
    assert_eq!(
        collection.documents.as_ref(),
        Some(&response["collection"]["documents"])
    );
    let paths: Vec<String> = collection
        .document_summaries()
        .into_iter()
        .map(|sys| sys.relative_path)
        .collect();
    assert_eq!(paths, vec!["zebra.md", "nested/apple.md"]);
    assert_eq!(collection.label.as_deref(), Some("Blog Posts"));
}

#[tokio::test]
async fn test_sort_variable_absent_without_title_field() {
    let executor = Arc::new(MockExecutor::new().respond_with(json!({
        "collection": { "name": "pages", "documents": { "totalCount": 0, "edges": [] } }
    })));
    let admin = facade(posts_and_pages(), executor.clone());

    let collection = admin.fetch_collection("pages", true).await.unwrap().unwrap();
    assert_eq!(collection.document_count(), Some(0));

    let variables = &executor.calls()[0].variables;
    assert!(variables.get("sort").is_none(), "sort must be omitted: {variables}");
    assert_eq!(variables["includeDocuments"], json!(true));
}

#[tokio::test]
async fn test_sort_variable_from_schema_metadata() {
    let metadata = SchemaMetadata::from_value(json!({
        "collections": [{
            "name": "posts",
            "fields": [
                { "name": "body", "type": "rich-text" },
                { "name": "headline", "type": "string", "isTitle": true }
            ]
        }]
    }))
    .unwrap();
    let executor = Arc::new(MockExecutor::new().respond_with(collection_response()));
    let admin = AdminFacade::new(Arc::new(metadata), executor.clone(), false);

    admin.fetch_collection("posts", true).await.unwrap();
    assert_eq!(executor.calls()[0].variables["sort"], json!("headline"));
}

#[tokio::test]
async fn test_fetch_collection_with_documents_propagates_failure() {
    let failure = TransportError::Http {
        status: 500,
        message: "index unavailable".to_string(),
    };
    let executor = Arc::new(MockExecutor::new().fail_with(failure.clone()));
    let admin = facade(posts_and_pages(), executor.clone());

    let err = admin.fetch_collection("posts", true).await.unwrap_err();
    assert!(matches!(err, AdminError::Transport(ref inner) if *inner == failure));
    assert_eq!(executor.call_count(), 1);
}

#[tokio::test]
async fn test_fetch_collection_with_documents_does_not_fall_back_to_metadata() {
    // Metadata failing must not mask or replace the remote answer
    let executor = Arc::new(MockExecutor::new().respond_with(collection_response()));
    let admin = facade(
        MockMetadata::failing(SchemaError::Unavailable("schema not built".to_string())),
        executor.clone(),
    );

    let collection = admin.fetch_collection("posts", true).await.unwrap().unwrap();
    assert_eq!(collection.document_count(), Some(2));
    assert!(executor.calls()[0].variables.get("sort").is_none());
}

#[tokio::test]
async fn test_documents_payload_is_returned_as_received() {
    // Extra members, omitted optional keys and null members all pass through
    let documents = json!({
        "totalCount": 3,
        "pageInfo": { "hasNextPage": false },
        "edges": [
            {
                "cursor": "c1",
                "node": {
                    "_sys": {
                        "template": "post",
                        "breadcrumbs": null,
                        "relativePath": "untitled.md",
                        "hasReferences": true
                    }
                }
            },
            { "node": {} },
            { "node": { "_sys": { "title": null, "relativePath": "b.md" } } }
        ]
    });
    let executor = Arc::new(MockExecutor::new().respond_with(json!({
        "collection": {
            "name": "posts",
            "label": "Blog Posts",
            "slug": "blog",
            "documents": documents.clone()
        }
    })));
    let admin = facade(posts_and_pages(), executor);

    let collection = admin.fetch_collection("posts", true).await.unwrap().unwrap();
    assert_eq!(collection.documents, Some(documents.clone()));
    assert_eq!(collection.extra["slug"], json!("blog"));

    let serialized = serde_json::to_value(&collection).unwrap();
    assert_eq!(serialized["documents"], documents);

    let summaries = collection.document_summaries();
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].relative_path, "untitled.md");
    assert!(summaries[0].breadcrumbs.is_empty());
    assert!(summaries[0].title.is_none());
    assert_eq!(summaries[2].relative_path, "b.md");
}

#[tokio::test]
async fn test_fetch_document_returns_reply_unmodified() {
    let reply = json!({
        "document": {
            "_values": { "title": "Hi", "hero": null },
            "_sys": { "filename": "a" }
        },
        "extensions": { "cost": 1 }
    });
    let executor = Arc::new(MockExecutor::new().respond_with(reply.clone()));
    let admin = facade(posts_and_pages(), executor);

    let response = admin.fetch_document("posts", "a.md").await.unwrap();
    assert_eq!(response.as_value(), &reply);
    assert_eq!(serde_json::to_value(&response).unwrap(), reply);
    assert_eq!(response.values().unwrap()["hero"], Value::Null);
}

#[tokio::test]
async fn test_fetch_document_null_document_is_not_an_error() {
    let executor = Arc::new(MockExecutor::new().respond_with(json!({ "document": null })));
    let admin = facade(posts_and_pages(), executor);

    let response = admin.fetch_document("posts", "gone.md").await.unwrap();
    assert!(response.document().is_none());
    assert!(response.values().is_none());
    assert_eq!(response.into_inner(), json!({ "document": null }));
}

#[tokio::test]
async fn test_null_remote_collection_is_none() {
    let executor = Arc::new(MockExecutor::new().respond_with(json!({ "collection": null })));
    let admin = facade(posts_and_pages(), executor);

    assert_eq!(admin.fetch_collection("posts", true).await.unwrap(), None);
}

#[tokio::test]
async fn test_malformed_remote_collection_is_an_error() {
    let executor = Arc::new(MockExecutor::new().respond_with(json!({ "unexpected": true })));
    let admin = facade(posts_and_pages(), executor);

    let err = admin.fetch_collection("posts", true).await.unwrap_err();
    assert!(matches!(err, AdminError::Serialization(_)));
}

#[tokio::test]
async fn test_fetch_document_returns_values() {
    let executor = Arc::new(MockExecutor::new().respond_with(json!({
        "document": { "_values": { "title": "Hi", "tags": ["a", "b"] } }
    })));
    let admin = facade(posts_and_pages(), executor.clone());

    let response = admin.fetch_document("posts", "a.md").await.unwrap();
    let values = response.values().expect("document values");
    assert_eq!(values["title"], json!("Hi"));
    assert_eq!(values["tags"], json!(["a", "b"]));

    let calls = executor.calls();
    assert_eq!(calls[0].document, DOCUMENT_VALUES_QUERY);
    assert_eq!(calls[0].variables, json!({ "collection": "posts", "relativePath": "a.md" }));
}

#[tokio::test]
async fn test_fetch_document_propagates_failure() {
    let failure = TransportError::GraphQl(vec!["Unable to find record content/posts/x.md".to_string()]);
    let executor = Arc::new(MockExecutor::new().fail_with(failure.clone()));
    let admin = facade(posts_and_pages(), executor);

    let err = admin.fetch_document("posts", "x.md").await.unwrap_err();
    assert!(matches!(err, AdminError::Transport(ref inner) if *inner == failure));
    assert_eq!(
        err.to_string(),
        "Transport error: GraphQL error: Unable to find record content/posts/x.md"
    );
}

#[tokio::test]
async fn test_create_document_sends_params_and_returns_raw_response() {
    let raw = json!({ "createDocument": { "__typename": "Post" } });
    let executor = Arc::new(MockExecutor::new().respond_with(raw.clone()));
    let admin = facade(posts_and_pages(), executor.clone());

    let body = params(json!({ "title": "New", "draft": true, "meta": { "views": 0 } }));
    let response = admin.create_document("posts", "new.md", body).await.unwrap();
    assert_eq!(response, raw);

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].document, CREATE_DOCUMENT_MUTATION);
    assert_eq!(
        calls[0].variables,
        json!({
            "collection": "posts",
            "relativePath": "new.md",
            "params": { "title": "New", "draft": true, "meta": { "views": 0 } }
        })
    );
}

#[tokio::test]
async fn test_update_document_uses_update_mutation() {
    let raw = json!({ "updateDocument": { "__typename": "Post" } });
    let executor = Arc::new(MockExecutor::new().respond_with(raw.clone()));
    let admin = facade(posts_and_pages(), executor.clone());

    let response = admin
        .update_document("posts", "a.md", params(json!({ "title": "Edited" })))
        .await
        .unwrap();
    assert_eq!(response, raw);
    assert_eq!(executor.calls()[0].document, UPDATE_DOCUMENT_MUTATION);
    assert_eq!(executor.calls()[0].variables["params"], json!({ "title": "Edited" }));
}

#[tokio::test]
async fn test_write_failures_propagate_unchanged() {
    let conflict = TransportError::GraphQl(vec!["Document already exists".to_string()]);
    let missing = TransportError::GraphQl(vec!["Unable to find record".to_string()]);
    let refused = TransportError::Connection("connection refused".to_string());
    let executor = Arc::new(
        MockExecutor::new()
            .fail_with(conflict.clone())
            .fail_with(missing.clone())
            .fail_with(refused.clone()),
    );
    let admin = facade(posts_and_pages(), executor.clone());

    let err = admin
        .create_document("posts", "a.md", DocumentValues::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Transport(ref inner) if *inner == conflict));

    let err = admin
        .update_document("posts", "gone.md", DocumentValues::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Transport(ref inner) if *inner == missing));

    let err = admin
        .delete_document(&DocumentRef::new("posts", "a.md"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Transport(ref inner) if *inner == refused));

    assert_eq!(executor.call_count(), 3);
}

#[tokio::test]
async fn test_delete_document_discards_payload() {
    let executor = Arc::new(MockExecutor::new().respond_with(json!({
        "deleteDocument": { "__typename": "DeleteDocumentPayload" }
    })));
    let admin = facade(posts_and_pages(), executor.clone());

    admin
        .delete_document(&DocumentRef::new("posts", "a.md"))
        .await
        .unwrap();

    let calls = executor.calls();
    assert_eq!(calls[0].document, DELETE_DOCUMENT_MUTATION);
    assert_eq!(calls[0].variables, json!({ "collection": "posts", "relativePath": "a.md" }));
}

#[tokio::test]
async fn test_is_authenticated_passes_through() {
    let admin = facade(
        posts_and_pages(),
        Arc::new(MockExecutor::new().authenticated(Ok(false))),
    );
    assert!(!admin.is_authenticated().await.unwrap());

    let admin = facade(posts_and_pages(), Arc::new(MockExecutor::new()));
    assert!(admin.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_is_authenticated_propagates_failure() {
    let failure = TransportError::Http {
        status: 502,
        message: "bad gateway".to_string(),
    };
    let admin = facade(
        posts_and_pages(),
        Arc::new(MockExecutor::new().authenticated(Err(failure.clone()))),
    );

    let err = admin.is_authenticated().await.unwrap_err();
    assert!(matches!(err, AdminError::Transport(ref inner) if *inner == failure));
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let executor = Arc::new(
        MockExecutor::new()
            .respond_with(json!({ "document": { "_values": { "title": "One" } } }))
            .respond_with(json!({ "document": { "_values": { "title": "Two" } } })),
    );
    let admin = facade(posts_and_pages(), executor.clone());

    let first = admin.clone();
    let second = admin.clone();
    let (a, b) = tokio::join!(
        first.fetch_document("posts", "one.md"),
        second.fetch_document("posts", "two.md")
    );
    let mut titles = vec![
        a.unwrap().values().unwrap()["title"].clone(),
        b.unwrap().values().unwrap()["title"].clone(),
    ];
    titles.sort_by_key(|v| v.to_string());
    assert_eq!(titles, vec![json!("One"), json!("Two")]);
    assert_eq!(executor.call_count(), 2);
}

#[tokio::test]
async fn test_data_layer_flag_is_captured() {
    let admin = AdminFacade::new(
        Arc::new(posts_and_pages()),
        Arc::new(MockExecutor::new()),
        true,
    );
    assert!(admin.uses_data_layer());
}
