use std::future::Future;
use std::pin::Pin;

use crate::shared::entities::ledger::LedgerEntry;
use crate::shared::entities::session::StatsSnapshot;
use crate::shared::entities::widget::{WidgetKind, WidgetPayload};
use crate::shared::entities::WidgetId;

pub type RenderFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Rendering surface for dashboard output. Creation is idempotent per id and
/// removal of an unknown id is a no-op; the dialog layer relies on both.
pub trait RenderPort: Send + Sync {
    fn create_widget(&self, id: WidgetId, kind: WidgetKind, payload: WidgetPayload) -> RenderFuture;
    fn update_widget(&self, id: WidgetId, payload: WidgetPayload) -> RenderFuture;
    fn remove_widget(&self, id: WidgetId) -> RenderFuture;
    fn render_stats(&self, stats: StatsSnapshot) -> RenderFuture;
    fn render_history(&self, entries: Vec<LedgerEntry>) -> RenderFuture;
}
