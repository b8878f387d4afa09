use std::sync::Arc;

use crate::relay::Relay;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: Relay,
}
