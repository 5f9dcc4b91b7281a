//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

use crate::config::session::SessionConfig;

#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) session: SessionConfig,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, session: SessionConfig) -> Self {
        Self { app, session }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, session: SessionConfig) -> Arc<Self> {
        Arc::new(Self::new(app, session))
    }
}
