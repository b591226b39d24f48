//! Test support for service-level integration tests.

mod helpers;

pub(crate) use context::TestContext;
