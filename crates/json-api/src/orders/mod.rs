//! Order Handlers

pub(crate) mod create;
pub(crate) mod delete;
mod errors;
pub(crate) mod get;
pub(crate) mod index;
mod responses;
pub(crate) mod update;

pub(crate) use responses::OrderResponse;
