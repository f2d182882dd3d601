//! Dashboard module - watch lists, parameters and the refresh loop.
//!
//! - **watchlist**: Built-in Taiwan, US and bond lists
//! - **params**: Settings resolution and per-instrument chart requests
//! - **engine**: One refresh cycle over the watch list
//! - **scheduler**: Periodic trigger for refresh cycles

pub mod engine;
pub mod params;
pub mod scheduler;
pub mod watchlist;

pub use engine::{DashboardEngine, DashboardFrame};
pub use params::{ChartRequest, DashboardParams};
pub use scheduler::RefreshScheduler;
pub use watchlist::{resolve_symbols, Market, WatchItem};
