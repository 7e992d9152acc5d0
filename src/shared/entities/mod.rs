pub mod identifiers;
pub mod ledger;
pub mod note;
pub mod session;
pub mod task;
pub mod widget;

pub use identifiers::{SessionId, WidgetId};
pub use ledger::{LedgerEntry, SessionLedger, HISTORY_CAPACITY};
pub use note::Note;
pub use session::{Counters, DashboardSession, StatsSnapshot};
pub use task::Task;
pub use widget::{WeatherReport, WidgetKind, WidgetPayload};
