use crate::models::DailyTotal;
use crate::storage::{load_list, DAILY_TOTALS_KEY};
use crate::store::KeyValueStore;

/// Read-only view of the saved per-day totals, in stored order.
#[derive(Debug, Clone, Default)]
pub struct DailyTotalsLog {
    entries: Vec<DailyTotal>,
}

impl DailyTotalsLog {
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            entries: load_list(store, DAILY_TOTALS_KEY).await,
        }
    }

    pub fn entries(&self) -> &[DailyTotal] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DailyTotal> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<&DailyTotal> {
        self.entries.iter().find(|total| total.date == date)
    }
}
