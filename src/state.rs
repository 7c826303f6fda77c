use crate::ledger::MealLedger;
use crate::store::KeyValueStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub ledger: Arc<Mutex<MealLedger>>,
}

impl AppState {
    pub async fn load(store: Arc<dyn KeyValueStore>, date_format: &str) -> Self {
        let ledger = MealLedger::load(store.clone(), date_format).await;
        Self {
            store,
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}
