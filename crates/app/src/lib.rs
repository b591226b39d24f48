//! Persistence, services and bearer-token auth for the Little Lemon API.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod ids;
