use crate::config::{is_valid_date_format, today_string, DEFAULT_DATE_FORMAT};
use crate::errors::{LedgerError, StoreError};
use crate::models::{MealEntry, Totals};
use crate::storage::{load_list, save_list, MEAL_LIST_KEY};
use crate::store::KeyValueStore;
use crate::totals::compute_totals;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The current session's meals, written through to the store after every change.
pub struct MealLedger {
    store: Arc<dyn KeyValueStore>,
    date_format: String,
    entries: Vec<MealEntry>,
}

impl MealLedger {
    pub async fn load(store: Arc<dyn KeyValueStore>, date_format: impl Into<String>) -> Self {
        let mut date_format = date_format.into();
        if !is_valid_date_format(&date_format) {
            warn!("invalid date format {date_format:?}, using {DEFAULT_DATE_FORMAT}");
            date_format = DEFAULT_DATE_FORMAT.to_string();
        }

        let entries = load_list(store.as_ref(), MEAL_LIST_KEY).await;
        debug!("loaded {} meals", entries.len());
        Self {
            store,
            date_format,
            entries,
        }
    }

    pub fn entries(&self) -> &[MealEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.entries)
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Adds a meal dated today. Returns `None` and leaves the ledger untouched
    /// when any field is empty or a number does not parse. The name is stored
    /// exactly as given.
    pub async fn add_meal(&mut self, meal: &str, calories: &str, protein: &str) -> Option<MealEntry> {
        let date = today_string(&self.date_format);
        self.add_meal_on(&date, meal, calories, protein).await
    }

    pub async fn add_meal_on(
        &mut self,
        date: &str,
        meal: &str,
        calories: &str,
        protein: &str,
    ) -> Option<MealEntry> {
        if meal.is_empty() || calories.trim().is_empty() || protein.trim().is_empty() {
            return None;
        }
        let (Some(calories), Some(protein)) = (parse_amount(calories), parse_amount(protein)) else {
            debug!("rejected meal {meal:?}: non-numeric amount");
            return None;
        };

        let entry = MealEntry {
            meal: meal.to_string(),
            calories,
            protein,
            date: date.to_string(),
        };
        self.entries.push(entry.clone());
        self.persist().await;
        Some(entry)
    }

    pub async fn remove_meal(&mut self, index: usize) -> Result<MealEntry, LedgerError> {
        if index >= self.entries.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        self.persist().await;
        Ok(removed)
    }

    pub async fn clear(&mut self) {
        self.entries.clear();
        self.persist().await;
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        save_list(self.store.as_ref(), MEAL_LIST_KEY, &self.entries).await
    }

    async fn persist(&self) {
        match self.save().await {
            Ok(()) => debug!("saved {} meals", self.entries.len()),
            Err(err) => error!("failed to save meal list: {err}"),
        }
    }
}

/// Integer prefix parse: leading whitespace and an optional `+` are skipped, then
/// the leading digits are taken and the rest ignored, so `"12.7"` reads as 12.
/// No digits, a minus sign, or overflow yield `None`.
pub fn parse_amount(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if digits_end == 0 {
        return None;
    }
    text[..digits_end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BrokenStore, MemoryStore};

    const DAY: &str = "1/5/2026";

    async fn empty_ledger() -> (Arc<MemoryStore>, MealLedger) {
        let store = Arc::new(MemoryStore::new());
        let ledger = MealLedger::load(store.clone(), "%-m/%-d/%Y").await;
        (store, ledger)
    }

    async fn persisted(store: &MemoryStore) -> Vec<MealEntry> {
        load_list(store, MEAL_LIST_KEY).await
    }

    #[test]
    fn parse_amount_truncates_and_rejects() {
        assert_eq!(parse_amount("500"), Some(500));
        assert_eq!(parse_amount("  42"), Some(42));
        assert_eq!(parse_amount("+7"), Some(7));
        assert_eq!(parse_amount("12.7"), Some(12));
        assert_eq!(parse_amount("30g"), Some(30));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount(".5"), None);
        assert_eq!(parse_amount("99999999999999999999999"), None);
    }

    #[tokio::test]
    async fn add_appends_and_writes_through() {
        let (store, mut ledger) = empty_ledger().await;

        let added = ledger.add_meal_on(DAY, "eggs", "300", "20").await.unwrap();
        assert_eq!(added.meal, "eggs");
        assert_eq!(added.date, DAY);
        ledger.add_meal_on(DAY, "rice", "500", "30").await.unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[1].meal, "rice");
        assert_eq!(persisted(&store).await, ledger.entries());
    }

    #[tokio::test]
    async fn add_with_blank_or_bad_field_is_a_no_op() {
        let (store, mut ledger) = empty_ledger().await;

        assert!(ledger.add_meal_on(DAY, "", "300", "20").await.is_none());
        assert!(ledger.add_meal_on(DAY, "eggs", "", "20").await.is_none());
        assert!(ledger.add_meal_on(DAY, "eggs", "300", "  ").await.is_none());
        assert!(ledger.add_meal_on(DAY, "eggs", "lots", "20").await.is_none());

        assert!(ledger.is_empty());
        assert_eq!(store.get(MEAL_LIST_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_meal_stamps_today() {
        let (_store, mut ledger) = empty_ledger().await;
        let added = ledger.add_meal("toast", "120", "4").await.unwrap();
        assert_eq!(added.date, today_string("%-m/%-d/%Y"));
    }

    #[tokio::test]
    async fn duplicate_meals_are_kept() {
        let (_store, mut ledger) = empty_ledger().await;
        ledger.add_meal_on(DAY, "shake", "200", "25").await.unwrap();
        ledger.add_meal_on(DAY, "shake", "200", "25").await.unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.totals(), Totals { calories: 400, protein: 50 });
    }

    #[tokio::test]
    async fn remove_drops_entry_and_writes_through() {
        let (store, mut ledger) = empty_ledger().await;
        ledger.add_meal_on(DAY, "eggs", "300", "20").await.unwrap();
        ledger.add_meal_on(DAY, "rice", "500", "30").await.unwrap();
        ledger.add_meal_on(DAY, "salad", "150", "5").await.unwrap();

        let removed = ledger.remove_meal(1).await.unwrap();
        assert_eq!(removed.meal, "rice");

        let names: Vec<&str> = ledger.entries().iter().map(|e| e.meal.as_str()).collect();
        assert_eq!(names, ["eggs", "salad"]);
        assert_eq!(persisted(&store).await, ledger.entries());
    }

    #[tokio::test]
    async fn remove_out_of_range_reports_and_keeps_ledger() {
        let (_store, mut ledger) = empty_ledger().await;
        ledger.add_meal_on(DAY, "eggs", "300", "20").await.unwrap();

        let err = ledger.remove_meal(3).await.unwrap_err();
        assert_eq!(err, LedgerError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn clear_empties_store_copy() {
        let (store, mut ledger) = empty_ledger().await;
        ledger.add_meal_on(DAY, "eggs", "300", "20").await.unwrap();
        ledger.clear().await;

        assert!(ledger.is_empty());
        assert_eq!(store.get(MEAL_LIST_KEY).await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn mixed_sequence_settles_to_in_memory_state() {
        let (store, mut ledger) = empty_ledger().await;
        for i in 0..6 {
            ledger
                .add_meal_on(DAY, &format!("meal {i}"), &(i * 100).to_string(), "10")
                .await
                .unwrap();
            if i % 2 == 1 {
                ledger.remove_meal(0).await.unwrap();
            }
        }
        let _ = ledger.remove_meal(10).await;

        assert_eq!(ledger.len(), 3);
        assert_eq!(persisted(&store).await, ledger.entries());
    }

    #[tokio::test]
    async fn reload_sees_previous_session() {
        let (store, mut ledger) = empty_ledger().await;
        ledger.add_meal_on(DAY, "eggs", "300", "20").await.unwrap();

        let reloaded = MealLedger::load(store.clone(), "%-m/%-d/%Y").await;
        assert_eq!(reloaded.entries(), ledger.entries());
    }

    #[tokio::test]
    async fn corrupt_store_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(MEAL_LIST_KEY, "{}").await.unwrap();
        let ledger = MealLedger::load(store, "%-m/%-d/%Y").await;
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn meal_name_is_stored_as_typed() {
        let (store, mut ledger) = empty_ledger().await;

        let padded = ledger.add_meal_on(DAY, "  eggs ", "300", "20").await.unwrap();
        assert_eq!(padded.meal, "  eggs ");
        let spaces = ledger.add_meal_on(DAY, "   ", "100", "5").await.unwrap();
        assert_eq!(spaces.meal, "   ");

        assert_eq!(ledger.len(), 2);
        assert_eq!(persisted(&store).await, ledger.entries());
    }

    #[tokio::test]
    async fn invalid_date_format_falls_back_to_default() {
        let ledger = MealLedger::load(Arc::new(MemoryStore::new()), "%Q").await;
        assert_eq!(ledger.date_format(), DEFAULT_DATE_FORMAT);

        let mut ledger = ledger;
        let added = ledger.add_meal("x", "1", "1").await.unwrap();
        assert_eq!(added.date, today_string(DEFAULT_DATE_FORMAT));
    }

    #[tokio::test]
    async fn storage_failures_leave_in_memory_ledger_working() {
        let mut ledger = MealLedger::load(Arc::new(BrokenStore), "%-m/%-d/%Y").await;
        assert!(ledger.is_empty());

        let added = ledger.add_meal_on(DAY, "eggs", "300", "20").await;
        assert_eq!(added.map(|entry| entry.meal), Some("eggs".to_string()));
        ledger.add_meal_on(DAY, "rice", "500", "30").await.unwrap();

        let removed = ledger.remove_meal(0).await.unwrap();
        assert_eq!(removed.meal, "eggs");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].meal, "rice");

        ledger.clear().await;
        assert!(ledger.is_empty());
        assert!(ledger.save().await.is_err());
    }
}
