//! Request handlers shared by the HTTP routes and the console menu.
//!
//! Each handler validates its input, runs one store operation and maps
//! store failures onto [`ServiceError`]. Handlers are synchronous; the HTTP
//! layer calls them directly and the menu calls them from its own thread.

use thiserror::Error;

use crate::model::{Confirmation, Item, ItemId, NewItem};
use crate::observability::metrics::{record_item_created, record_request};
use crate::storage::{ItemStore, StoreError};

/// Error surfaced to callers of the request handlers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Item not found")]
    NotFound(ItemId),

    #[error("{0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "invalid",
            Self::Internal(_) => "error",
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => {
                tracing::error!(error = %other, "Item store failure");
                Self::Internal(other.to_string())
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Item request handlers over an explicitly opened store handle.
#[derive(Clone)]
pub struct ItemService {
    store: ItemStore,
}

impl ItemService {
    /// Create a new service over the given store.
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }

    /// Underlying store handle.
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    #[tracing::instrument(skip(self))]
    pub fn list_items(&self) -> ServiceResult<Vec<Item>> {
        let result = self.store.list_all().map_err(ServiceError::from);
        observe("list", &result);
        result
    }

    #[tracing::instrument(skip(self))]
    pub fn get_item(&self, id: ItemId) -> ServiceResult<Item> {
        let result = self.store.get(id).map_err(ServiceError::from);
        observe("get", &result);
        result
    }

    #[tracing::instrument(skip(self, item), fields(name = %item.name))]
    pub fn create_item(&self, item: NewItem) -> ServiceResult<Item> {
        let result = item
            .validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))
            .and_then(|()| self.store.create(&item).map_err(ServiceError::from));
        observe("create", &result);

        if let Ok(created) = &result {
            record_item_created();
            tracing::debug!(id = created.id, "Item created");
        }
        result
    }

    /// Mark an item as claimed. Already claimed items are accepted silently.
    #[tracing::instrument(skip(self))]
    pub fn claim_item(&self, id: ItemId) -> ServiceResult<Confirmation> {
        let result = self
            .store
            .claim(id)
            .map(|()| Confirmation::claimed())
            .map_err(ServiceError::from);
        observe("claim", &result);
        result
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_item(&self, id: ItemId) -> ServiceResult<Confirmation> {
        let result = self
            .store
            .delete(id)
            .map(|()| Confirmation::deleted())
            .map_err(ServiceError::from);
        observe("delete", &result);
        result
    }
}

fn observe<T>(operation: &str, result: &ServiceResult<T>) {
    match result {
        Ok(_) => record_request(operation, "ok"),
        Err(e) => {
            tracing::debug!(operation, error = %e, "Item operation rejected");
            record_request(operation, e.outcome());
        }
    }
}
