use crate::chat::HistoryStore;
use crate::core::AppConfig;
use crate::session::Session;

pub struct AppState {
    pub session: Session,
    pub store: HistoryStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: HistoryStore, config: AppConfig) -> Self {
        Self {
            session: Session::initialize(&store),
            store,
            config,
        }
    }
}
