//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;
use tracing::error;

use littlelemon::roles::Principal;

use crate::errors::{ApiError, NOT_AUTHENTICATED};

/// Typed access to values the middleware leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// The authenticated caller, if any.
    fn viewer(&self) -> Option<Principal>;

    fn principal_or_401(&self) -> Result<Principal, ApiError>;

    fn insert_principal(&mut self, principal: Principal);
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| {
            error!("missing {} in depot", std::any::type_name::<T>());

            ApiError::internal()
        })
    }

    fn viewer(&self) -> Option<Principal> {
        self.obtain::<Principal>().ok().copied()
    }

    fn principal_or_401(&self) -> Result<Principal, ApiError> {
        self.viewer()
            .ok_or_else(|| ApiError::unauthorized(NOT_AUTHENTICATED))
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }
}
