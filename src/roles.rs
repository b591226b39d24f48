//! Roles
//!
//! A principal's roles are resolved once per request from the account's superuser flag and its
//! staff group memberships. Everything downstream reads the resolved [`RoleSet`] rather than
//! going back to group membership.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

use crate::ids::UserId;

/// A role a principal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Any authenticated user without a staff role.
    Customer,

    /// Member of the delivery crew group.
    DeliveryCrew,

    /// Member of the manager group.
    Manager,

    /// Superuser. Passes every manager check.
    Admin,
}

impl Role {
    const fn bit(self) -> u8 {
        match self {
            Self::Customer => 0,
            Self::DeliveryCrew => 1,
            Self::Manager => 1 << 1,
            Self::Admin => 1 << 2,
        }
    }
}

/// Staff group an account can be a member of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffGroup {
    /// Managers
    Manager,

    /// Delivery crew
    DeliveryCrew,
}

impl StaffGroup {
    /// Storage name of the group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::DeliveryCrew => "delivery_crew",
        }
    }

    /// Role granted by membership.
    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Self::Manager => Role::Manager,
            Self::DeliveryCrew => Role::DeliveryCrew,
        }
    }
}

impl Display for StaffGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Unknown staff group name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown staff group: {0}")]
pub struct UnknownStaffGroup(pub String);

impl FromStr for StaffGroup {
    type Err = UnknownStaffGroup;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "manager" => Ok(Self::Manager),
            "delivery-crew" | "delivery_crew" => Ok(Self::DeliveryCrew),
            other => Err(UnknownStaffGroup(other.to_owned())),
        }
    }
}

/// Resolved set of roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// A set with no staff roles, i.e. a plain customer.
    pub const CUSTOMER: Self = Self(0);

    /// Resolve roles from the superuser flag and staff group memberships.
    pub fn resolve(is_superuser: bool, groups: impl IntoIterator<Item = StaffGroup>) -> Self {
        let base = if is_superuser {
            Self::CUSTOMER.with(Role::Admin)
        } else {
            Self::CUSTOMER
        };

        groups
            .into_iter()
            .fold(base, |roles, group| roles.with(group.role()))
    }

    /// Add a role to the set.
    #[must_use]
    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    /// Whether the set holds `role`. `Customer` holds exactly when no staff role does.
    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        match role {
            Role::Customer => self.0 == 0,
            _ => self.0 & role.bit() != 0,
        }
    }

    /// Manager or Admin.
    #[must_use]
    pub const fn is_manager(self) -> bool {
        self.contains(Role::Manager) || self.contains(Role::Admin)
    }
}

/// An authenticated user together with its resolved roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Authenticated user.
    pub user: UserId,

    /// Roles held for the lifetime of the request.
    pub roles: RoleSet,
}

impl Principal {
    /// Build a principal.
    #[must_use]
    pub const fn new(user: UserId, roles: RoleSet) -> Self {
        Self { user, roles }
    }

    /// Manager or Admin.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        self.roles.is_manager()
    }

    /// Member of the delivery crew.
    #[must_use]
    pub const fn is_delivery_crew(&self) -> bool {
        self.roles.contains(Role::DeliveryCrew)
    }
}
