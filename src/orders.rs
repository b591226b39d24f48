//! Orders
//!
//! Order status, list filters and the rules deciding who may change what on an order.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::civil::Date;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    ids::UserId,
    policy::{AccessDenied, Action, OrderParties, Resource, ensure},
    roles::Principal,
};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Placed, not yet picked up by the kitchen.
    #[default]
    Pending,

    /// Being prepared.
    Processing,

    /// With the delivery crew.
    OutForDelivery,

    /// Handed to the customer.
    Delivered,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// Wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Unparseable order status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("\"{0}\" is not a valid status.")]
pub struct OrderStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = OrderStatusError;

    /// Accepts the status names (any case, `-` or space for `_`) and the legacy delivered flag
    /// (`0`/`false` for pending, `1`/`true` for delivered).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");

        match normalised.as_str() {
            "pending" | "0" | "false" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" | "1" | "true" => Ok(Self::Delivered),
            _ => Err(OrderStatusError(value.to_owned())),
        }
    }
}

/// Optional narrowing applied on top of a principal's order scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Placed by this user.
    pub user: Option<UserId>,

    /// Assigned to this delivery crew member.
    pub delivery_crew: Option<UserId>,

    /// In this status.
    pub status: Option<OrderStatus>,

    /// Total at least this amount.
    pub total_from: Option<Decimal>,

    /// Total at most this amount.
    pub total_to: Option<Decimal>,

    /// Placed on or after this date.
    pub date_from: Option<Date>,

    /// Placed on or before this date.
    pub date_to: Option<Date>,
}

/// Requested changes to an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderChanges {
    /// Assign this delivery crew member.
    pub delivery_crew: Option<UserId>,

    /// Move to this status.
    pub status: Option<OrderStatus>,
}

impl OrderChanges {
    /// No field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.delivery_crew.is_none() && self.status.is_none()
    }
}

/// Refusal of an order update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderUpdateError {
    /// The principal may not make this change.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The assigned delivery crew sent no status.
    #[error("Status field is required in the request.")]
    StatusRequired,
}

/// Check an update against the policy.
///
/// Managers may change any field. The assigned delivery crew may only change the status, and
/// must send one. Anyone else is refused whatever the payload.
///
/// # Errors
///
/// Returns [`OrderUpdateError`] when the update is refused.
pub fn check_update(
    principal: &Principal,
    parties: &OrderParties,
    changes: &OrderChanges,
) -> Result<(), OrderUpdateError> {
    if ensure(principal, Resource::Order, Action::Update, Some(parties)).is_ok() {
        return Ok(());
    }

    ensure(principal, Resource::Order, Action::UpdateStatus, Some(parties))?;

    if changes.delivery_crew.is_some() {
        return Err(AccessDenied {
            resource: Resource::Order,
            action: Action::Update,
        }
        .into());
    }

    if changes.status.is_none() {
        return Err(OrderUpdateError::StatusRequired);
    }

    Ok(())
}
