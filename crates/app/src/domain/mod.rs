//! Little Lemon Domain Concerns

use littlelemon::{
    policy::{AccessDenied, Action, OrderParties, Resource, ensure},
    roles::Principal,
};
use tracing::debug;

pub mod carts;
pub mod catalog;
pub mod orders;
pub mod users;

/// Check the access policy, logging denials.
pub(crate) fn authorize(
    principal: &Principal,
    resource: Resource,
    action: Action,
    parties: Option<&OrderParties>,
) -> Result<(), AccessDenied> {
    ensure(principal, resource, action, parties).inspect_err(|_| {
        debug!(
            user_id = %principal.user,
            ?resource,
            ?action,
            "authorization denied"
        );
    })
}
