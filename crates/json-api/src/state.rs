//! Request state

use std::sync::Arc;

use littlelemon_app::context::AppContext;

/// Injected into the depot by `affix_state` and shared by every request.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    pub(crate) fn shared(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
