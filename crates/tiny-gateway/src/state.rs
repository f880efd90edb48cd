use std::sync::Arc;

use tiny_shortener::Shortener;

use crate::auth::Authorizer;

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    authorizer: Arc<Authorizer>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, authorizer: Authorizer) -> Self {
        Self {
            shortener,
            authorizer: Arc::new(authorizer),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }
}
