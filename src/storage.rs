use crate::errors::StoreError;
use crate::store::KeyValueStore;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{error, warn};

pub const MEAL_LIST_KEY: &str = "calorieList";
pub const DAILY_TOTALS_KEY: &str = "dailyTotals";

/// Reads a JSON array stored under `key`.
///
/// Never fails: a missing key, a read error, invalid JSON, a non-array value or
/// elements of the wrong shape all come back as an empty list. Everything except
/// the missing key is logged.
pub async fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            error!("failed to read {key} from storage: {err}");
            return Vec::new();
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            error!("failed to parse {key}: {err}");
            return Vec::new();
        }
    };

    if !value.is_array() {
        warn!("stored {key} is not a list, starting empty");
        return Vec::new();
    }

    match serde_json::from_value(value) {
        Ok(items) => items,
        Err(err) => {
            error!("failed to decode {key} entries: {err}");
            Vec::new()
        }
    }
}

pub async fn save_list<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(items)?;
    store.set(key, &payload).await
}
