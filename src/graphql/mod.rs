//! GraphQL operation documents understood by the content endpoint

pub mod queries;

pub use queries::{
    COLLECTION_WITH_DOCUMENTS_QUERY, CREATE_DOCUMENT_MUTATION, DELETE_DOCUMENT_MUTATION,
    DOCUMENT_VALUES_QUERY, UPDATE_DOCUMENT_MUTATION,
};
