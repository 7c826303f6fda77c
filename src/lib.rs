pub mod app;
pub mod config;
pub mod daily_log;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod totals;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use daily_log::DailyTotalsLog;
pub use ledger::MealLedger;
pub use state::AppState;
pub use store::{FileStore, KeyValueStore, MemoryStore};
