//! Fixed operation documents sent to the content endpoint.
//!
//! Each document is parameterized only through variables; the facade never
//! splices values into the text.

/// Variables: `collection: String!`, `relativePath: String!`
pub const DELETE_DOCUMENT_MUTATION: &str = r#"
    mutation DeleteDocument($collection: String!, $relativePath: String!) {
        deleteDocument(collection: $collection, relativePath: $relativePath) {
            __typename
        }
    }
"#;

/// Variables: `collection: String!`, `includeDocuments: Boolean!`, `sort: String`
pub const COLLECTION_WITH_DOCUMENTS_QUERY: &str = r#"
    query CollectionWithDocuments($collection: String!, $includeDocuments: Boolean!, $sort: String) {
        collection(collection: $collection) {
            name
            label
            format
            templates
            documents(sort: $sort) @include(if: $includeDocuments) {
                totalCount
                edges {
                    node {
                        ... on Document {
                            _sys {
                                title
                                template
                                breadcrumbs
                                path
                                basename
                                relativePath
                                filename
                                extension
                            }
                        }
                    }
                }
            }
        }
    }
"#;

/// Variables: `collection: String!`, `relativePath: String!`
pub const DOCUMENT_VALUES_QUERY: &str = r#"
    query DocumentValues($collection: String!, $relativePath: String!) {
        document(collection: $collection, relativePath: $relativePath) {
            ... on Document {
                _values
            }
        }
    }
"#;

/// Variables: `collection: String!`, `relativePath: String!`, `params: DocumentMutation!`
pub const CREATE_DOCUMENT_MUTATION: &str = r#"
    mutation CreateDocument($collection: String!, $relativePath: String!, $params: DocumentMutation!) {
        createDocument(collection: $collection, relativePath: $relativePath, params: $params) {
            __typename
        }
    }
"#;

/// Variables: `collection: String!`, `relativePath: String!`, `params: DocumentMutation!`
pub const UPDATE_DOCUMENT_MUTATION: &str = r#"
    mutation UpdateDocument($collection: String!, $relativePath: String!, $params: DocumentMutation!) {
        updateDocument(collection: $collection, relativePath: $relativePath, params: $params) {
            __typename
        }
    }
"#;
