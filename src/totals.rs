use crate::config::today_string;
use crate::models::{DailyTotal, MealEntry, Totals};
use crate::storage::{load_list, save_list, DAILY_TOTALS_KEY};
use crate::store::KeyValueStore;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Updated,
}

pub fn compute_totals(entries: &[MealEntry]) -> Totals {
    entries.iter().fold(Totals::default(), |acc, entry| Totals {
        calories: acc.calories.saturating_add(entry.calories),
        protein: acc.protein.saturating_add(entry.protein),
    })
}

/// Upserts by exact date string: the first record with the same date gets its
/// totals overwritten, otherwise the record is appended.
pub fn merge_daily_total(log: &mut Vec<DailyTotal>, total: DailyTotal) -> MergeOutcome {
    match log.iter_mut().find(|existing| existing.date == total.date) {
        Some(existing) => {
            existing.total_calories = total.total_calories;
            existing.total_protein = total.total_protein;
            MergeOutcome::Updated
        }
        None => {
            log.push(total);
            MergeOutcome::Inserted
        }
    }
}

/// Snapshots the ledger totals under `date` into the persisted log and returns
/// the merged log. A failed write is logged; the merged log is returned anyway.
pub async fn save_daily_total(
    store: &dyn KeyValueStore,
    entries: &[MealEntry],
    date: &str,
) -> Vec<DailyTotal> {
    let totals = compute_totals(entries);
    let mut log: Vec<DailyTotal> = load_list(store, DAILY_TOTALS_KEY).await;

    let outcome = merge_daily_total(
        &mut log,
        DailyTotal {
            date: date.to_string(),
            total_calories: totals.calories,
            total_protein: totals.protein,
        },
    );

    match save_list(store, DAILY_TOTALS_KEY, &log).await {
        Ok(()) => info!(
            "{outcome:?} daily total for {date}: {} kcal, {} g protein",
            totals.calories, totals.protein
        ),
        Err(err) => error!("failed to save daily totals: {err}"),
    }

    log
}

pub async fn save_daily_total_today(
    store: &dyn KeyValueStore,
    entries: &[MealEntry],
    date_format: &str,
) -> Vec<DailyTotal> {
    let date = today_string(date_format);
    save_daily_total(store, entries, &date).await
}
