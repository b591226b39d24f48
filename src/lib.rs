//! Little Lemon
//!
//! Domain core of the Little Lemon ordering service: typed ids, role resolution, the access
//! control policy, order rules, pricing, pagination and catalog validation. Nothing in here
//! touches storage or the network.

pub mod catalog;
pub mod ids;
pub mod orders;
pub mod pagination;
pub mod policy;
pub mod pricing;
pub mod roles;
