//! Access Control Policy
//!
//! Every authorization decision is answered from [`POLICY`], a single table mapping a
//! `(resource, action)` pair to the grants that allow it. Order-level grants
//! ([`Access::OrderOwner`], [`Access::AssignedCrew`]) are evaluated against the
//! [`OrderParties`] of the order being touched.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::{ids::UserId, roles::Principal};

/// Resources guarded by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Menu items
    MenuItem,

    /// Menu categories
    Category,

    /// The caller's own cart lines
    Cart,

    /// Orders
    Order,

    /// Staff group memberships
    StaffGroup,
}

/// Actions a principal can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read a single resource.
    Read,

    /// List resources.
    List,

    /// Create a resource.
    Create,

    /// Update any field of a resource.
    Update,

    /// Update only the status of an order.
    UpdateStatus,

    /// Delete a resource.
    Delete,
}

/// Who a rule grants access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, including anonymous callers.
    Anyone,

    /// Any authenticated principal.
    Authenticated,

    /// Managers and admins.
    Manager,

    /// The user that placed the order.
    OrderOwner,

    /// The delivery crew member assigned to the order.
    AssignedCrew,
}

/// One row of the policy table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Guarded resource.
    pub resource: Resource,

    /// Attempted action.
    pub action: Action,

    /// Any one of these grants allows the action.
    pub grants: &'static [Access],
}

const fn rule(resource: Resource, action: Action, grants: &'static [Access]) -> Rule {
    Rule {
        resource,
        action,
        grants,
    }
}

/// The policy table. Pairs that are not listed are denied.
pub static POLICY: &[Rule] = &[
    rule(Resource::MenuItem, Action::Read, &[Access::Anyone]),
    rule(Resource::MenuItem, Action::List, &[Access::Anyone]),
    rule(Resource::MenuItem, Action::Create, &[Access::Manager]),
    rule(Resource::MenuItem, Action::Update, &[Access::Manager]),
    rule(Resource::MenuItem, Action::Delete, &[Access::Manager]),
    rule(Resource::Category, Action::Read, &[Access::Anyone]),
    rule(Resource::Category, Action::List, &[Access::Anyone]),
    rule(Resource::Category, Action::Create, &[Access::Manager]),
    rule(Resource::Category, Action::Update, &[Access::Manager]),
    rule(Resource::Cart, Action::List, &[Access::Authenticated]),
    rule(Resource::Cart, Action::Create, &[Access::Authenticated]),
    rule(Resource::Cart, Action::Delete, &[Access::Authenticated]),
    rule(Resource::Order, Action::List, &[Access::Authenticated]),
    rule(Resource::Order, Action::Create, &[Access::Authenticated]),
    rule(
        Resource::Order,
        Action::Read,
        &[Access::Manager, Access::OrderOwner, Access::AssignedCrew],
    ),
    rule(Resource::Order, Action::Update, &[Access::Manager]),
    rule(
        Resource::Order,
        Action::UpdateStatus,
        &[Access::Manager, Access::AssignedCrew],
    ),
    rule(Resource::Order, Action::Delete, &[Access::Manager]),
    rule(Resource::StaffGroup, Action::List, &[Access::Manager]),
    rule(Resource::StaffGroup, Action::Create, &[Access::Manager]),
    rule(Resource::StaffGroup, Action::Delete, &[Access::Manager]),
];

/// The users an order-level grant is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderParties {
    /// User that placed the order.
    pub owner: UserId,

    /// Delivery crew member assigned to the order, if any.
    pub delivery_crew: Option<UserId>,
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The action may proceed.
    Allow,

    /// The action must be refused.
    Deny,
}

impl Decision {
    /// Whether the decision allows the action.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Raised when the policy denies an action to an authenticated principal.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub struct AccessDenied {
    /// Guarded resource.
    pub resource: Resource,

    /// Refused action.
    pub action: Action,
}

impl Display for AccessDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let message = match (self.resource, self.action) {
            (Resource::Order, Action::Read) => "You are not authorized to view this order",
            (Resource::Order, Action::Update | Action::UpdateStatus) => {
                "You are not authorized to update this order"
            }
            (Resource::Order, Action::Delete) => "You are not authorized to delete orders",
            (Resource::StaffGroup | Resource::Cart, _) => {
                "You do not have permission to access this resource."
            }
            _ => "You are not authorized to perform this action.",
        };

        f.write_str(message)
    }
}

/// Look up the rule for a `(resource, action)` pair.
pub fn rule_for(resource: Resource, action: Action) -> Option<&'static Rule> {
    POLICY
        .iter()
        .find(|rule| rule.resource == resource && rule.action == action)
}

/// Decide whether `viewer` may perform `action` on `resource`.
///
/// `viewer` is `None` for anonymous callers. `parties` is only consulted by order-level grants
/// and denies those grants when absent.
pub fn authorize(
    viewer: Option<&Principal>,
    resource: Resource,
    action: Action,
    parties: Option<&OrderParties>,
) -> Decision {
    let Some(rule) = rule_for(resource, action) else {
        return Decision::Deny;
    };

    let granted = rule
        .grants
        .iter()
        .any(|access| grants(*access, viewer, parties));

    if granted {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Like [`authorize`] for an authenticated principal, surfacing a denial as an error.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the policy denies the action.
pub fn ensure(
    principal: &Principal,
    resource: Resource,
    action: Action,
    parties: Option<&OrderParties>,
) -> Result<(), AccessDenied> {
    if authorize(Some(principal), resource, action, parties).is_allowed() {
        Ok(())
    } else {
        Err(AccessDenied { resource, action })
    }
}

fn grants(access: Access, viewer: Option<&Principal>, parties: Option<&OrderParties>) -> bool {
    match (access, viewer) {
        (Access::Anyone, _) => true,
        (_, None) => false,
        (Access::Authenticated, Some(_)) => true,
        (Access::Manager, Some(principal)) => principal.is_manager(),
        (Access::OrderOwner, Some(principal)) => {
            parties.is_some_and(|parties| parties.owner == principal.user)
        }
        (Access::AssignedCrew, Some(principal)) => parties.is_some_and(|parties| {
            principal.is_delivery_crew() && parties.delivery_crew == Some(principal.user)
        }),
    }
}

/// Base set of orders a principal may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Every order.
    All,

    /// Orders assigned to this delivery crew member.
    AssignedTo(UserId),

    /// Orders placed by this user.
    PlacedBy(UserId),
}

impl OrderScope {
    /// Whether an order with these parties falls inside the scope.
    #[must_use]
    pub fn includes(self, parties: &OrderParties) -> bool {
        match self {
            Self::All => true,
            Self::AssignedTo(user) => parties.delivery_crew == Some(user),
            Self::PlacedBy(user) => parties.owner == user,
        }
    }
}

/// Resolve the order list scope for a principal.
pub fn order_scope(principal: &Principal) -> OrderScope {
    if principal.is_manager() {
        OrderScope::All
    } else if principal.is_delivery_crew() {
        OrderScope::AssignedTo(principal.user)
    } else {
        OrderScope::PlacedBy(principal.user)
    }
}

#[cfg(test)]
mod tests {
    use crate::roles::{Role, RoleSet};

    use super::*;

    const CUSTOMER: Principal = Principal::new(UserId::from_raw(1), RoleSet::CUSTOMER);
    const OTHER_CUSTOMER: Principal = Principal::new(UserId::from_raw(2), RoleSet::CUSTOMER);
    const CREW: Principal = Principal::new(
        UserId::from_raw(3),
        RoleSet::CUSTOMER.with(Role::DeliveryCrew),
    );
    const MANAGER: Principal =
        Principal::new(UserId::from_raw(4), RoleSet::CUSTOMER.with(Role::Manager));
    const ADMIN: Principal =
        Principal::new(UserId::from_raw(5), RoleSet::CUSTOMER.with(Role::Admin));

    const PARTIES: OrderParties = OrderParties {
        owner: CUSTOMER.user,
        delivery_crew: Some(CREW.user),
    };

    #[test]
    fn anonymous_may_only_read_catalog() {
        for resource in [Resource::MenuItem, Resource::Category] {
            assert!(authorize(None, resource, Action::List, None).is_allowed());
            assert!(authorize(None, resource, Action::Read, None).is_allowed());
            assert!(!authorize(None, resource, Action::Create, None).is_allowed());
        }

        assert!(!authorize(None, Resource::Cart, Action::List, None).is_allowed());
        assert!(!authorize(None, Resource::Order, Action::Create, None).is_allowed());
    }

    #[test]
    fn catalog_writes_require_manager() {
        for principal in [CUSTOMER, CREW] {
            let result = ensure(&principal, Resource::MenuItem, Action::Create, None);

            assert_eq!(
                result,
                Err(AccessDenied {
                    resource: Resource::MenuItem,
                    action: Action::Create
                })
            );
        }

        assert!(ensure(&MANAGER, Resource::MenuItem, Action::Delete, None).is_ok());
        assert!(ensure(&ADMIN, Resource::MenuItem, Action::Update, None).is_ok());
    }

    #[test]
    fn order_read_allows_owner_crew_and_manager() {
        for principal in [CUSTOMER, CREW, MANAGER, ADMIN] {
            assert!(
                ensure(&principal, Resource::Order, Action::Read, Some(&PARTIES)).is_ok(),
                "expected {principal:?} to read the order"
            );
        }

        let denied = ensure(&OTHER_CUSTOMER, Resource::Order, Action::Read, Some(&PARTIES));

        assert!(denied.is_err(), "unrelated customer must not read the order");
    }

    #[test]
    fn unassigned_crew_cannot_update_status() {
        let unassigned = OrderParties {
            owner: CUSTOMER.user,
            delivery_crew: None,
        };

        assert!(ensure(&CREW, Resource::Order, Action::UpdateStatus, Some(&unassigned)).is_err());
        assert!(ensure(&CREW, Resource::Order, Action::UpdateStatus, Some(&PARTIES)).is_ok());
    }

    #[test]
    fn owner_cannot_update_own_order() {
        assert!(ensure(&CUSTOMER, Resource::Order, Action::Update, Some(&PARTIES)).is_err());
        assert!(ensure(&CUSTOMER, Resource::Order, Action::UpdateStatus, Some(&PARTIES)).is_err());
    }

    #[test]
    fn order_level_grants_deny_without_parties() {
        assert!(ensure(&CUSTOMER, Resource::Order, Action::Read, None).is_err());
    }

    #[test]
    fn denial_messages_match_resource_and_action() {
        let view = AccessDenied {
            resource: Resource::Order,
            action: Action::Read,
        };
        let delete = AccessDenied {
            resource: Resource::Order,
            action: Action::Delete,
        };
        let staff = AccessDenied {
            resource: Resource::StaffGroup,
            action: Action::List,
        };
        let generic = AccessDenied {
            resource: Resource::MenuItem,
            action: Action::Create,
        };

        assert_eq!(view.to_string(), "You are not authorized to view this order");
        assert_eq!(delete.to_string(), "You are not authorized to delete orders");
        assert_eq!(
            staff.to_string(),
            "You do not have permission to access this resource."
        );
        assert_eq!(
            generic.to_string(),
            "You are not authorized to perform this action."
        );
    }

    #[test]
    fn order_scope_follows_strongest_role() {
        assert_eq!(order_scope(&MANAGER), OrderScope::All);
        assert_eq!(order_scope(&ADMIN), OrderScope::All);
        assert_eq!(order_scope(&CREW), OrderScope::AssignedTo(CREW.user));
        assert_eq!(order_scope(&CUSTOMER), OrderScope::PlacedBy(CUSTOMER.user));
    }

    #[test]
    fn customer_scope_excludes_other_users_orders() {
        let scope = order_scope(&OTHER_CUSTOMER);

        assert!(!scope.includes(&PARTIES));
    }

    #[test]
    fn every_rule_is_unique() {
        for (index, rule) in POLICY.iter().enumerate() {
            let duplicates = POLICY
                .iter()
                .skip(index + 1)
                .filter(|other| other.resource == rule.resource && other.action == rule.action)
                .count();

            assert_eq!(duplicates, 0, "duplicate rule for {rule:?}");
        }
    }
}
