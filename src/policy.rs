//! Failure policy per facade operation
//!
//! Operations answered from local metadata recover from failures with a
//! default value after logging them. Every operation touching the remote
//! endpoint propagates failures unchanged.

use std::fmt;

use crate::error::AdminResult;

/// Every operation the facade exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminOperation {
    IsAuthenticated,
    FetchCollections,
    FetchCollection,
    FetchCollectionWithDocuments,
    FetchDocument,
    CreateDocument,
    UpdateDocument,
    DeleteDocument,
}

/// What to do when an operation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the error to the caller
    Propagate,
    /// Log the error and substitute the operation's default
    Recover,
}

impl AdminOperation {
    pub const ALL: [AdminOperation; 8] = [
        AdminOperation::IsAuthenticated,
        AdminOperation::FetchCollections,
        AdminOperation::FetchCollection,
        AdminOperation::FetchCollectionWithDocuments,
        AdminOperation::FetchDocument,
        AdminOperation::CreateDocument,
        AdminOperation::UpdateDocument,
        AdminOperation::DeleteDocument,
    ];

    pub const fn failure_policy(self) -> FailurePolicy {
        match self {
            AdminOperation::FetchCollections | AdminOperation::FetchCollection => {
                FailurePolicy::Recover
            }
            AdminOperation::IsAuthenticated
            | AdminOperation::FetchCollectionWithDocuments
            | AdminOperation::FetchDocument
            | AdminOperation::CreateDocument
            | AdminOperation::UpdateDocument
            | AdminOperation::DeleteDocument => FailurePolicy::Propagate,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AdminOperation::IsAuthenticated => "is_authenticated",
            AdminOperation::FetchCollections => "fetch_collections",
            AdminOperation::FetchCollection => "fetch_collection",
            AdminOperation::FetchCollectionWithDocuments => "fetch_collection_with_documents",
            AdminOperation::FetchDocument => "fetch_document",
            AdminOperation::CreateDocument => "create_document",
            AdminOperation::UpdateDocument => "update_document",
            AdminOperation::DeleteDocument => "delete_document",
        }
    }

    /// Apply this operation's failure policy to `result`.
    ///
    /// Under [`FailurePolicy::Recover`] a failure is logged once and replaced
    /// by `default()`.
    pub fn apply<T, F>(self, result: AdminResult<T>, default: F) -> AdminResult<T>
    where
        F: FnOnce() -> T,
    {
        match (result, self.failure_policy()) {
            (Ok(value), _) => Ok(value),
            (Err(e), FailurePolicy::Propagate) => Err(e),
            (Err(e), FailurePolicy::Recover) => {
                log::error!("Unable to {}(): {}", self.name(), e);
                Ok(default())
            }
        }
    }

    /// Pass `result` through unchanged. Only valid for operations whose
    /// policy is [`FailurePolicy::Propagate`], which have no default to
    /// substitute.
    pub fn propagate<T>(self, result: AdminResult<T>) -> AdminResult<T> {
        debug_assert_eq!(self.failure_policy(), FailurePolicy::Propagate, "{}", self.name());
        result
    }
}

impl fmt::Display for AdminOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
