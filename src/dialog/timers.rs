use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::shared::entities::WidgetId;

use super::types::DialogIn;

struct TimerHandle {
    stop: oneshot::Sender<()>,
    minutes: u32,
}

/// Owns one countdown task per timer widget. Each task ticks independently
/// and is released on expiry, manual stop or widget removal; stopping one
/// never touches the others.
pub struct TimerRegistry {
    tick_every: Duration,
    active: HashMap<WidgetId, TimerHandle>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::with_tick(Duration::from_secs(1))
    }

    /// Tests shrink the tick to keep countdowns fast.
    pub fn with_tick(tick_every: Duration) -> Self {
        Self {
            tick_every,
            active: HashMap::new(),
        }
    }

    /// Starts a countdown of `minutes` posting ticks back through `tx`.
    /// A second start for the same widget is ignored.
    pub fn start(&mut self, widget: WidgetId, minutes: u32, tx: UnboundedSender<DialogIn>) {
        if self.active.contains_key(&widget) {
            return;
        }
        let (stop_tx, mut stop_rx) = oneshot::channel();
        self.active.insert(
            widget.clone(),
            TimerHandle {
                stop: stop_tx,
                minutes,
            },
        );

        let tick_every = self.tick_every;
        tokio::spawn(async move {
            let mut remaining = i64::from(minutes) * 60;
            let mut tick = interval(tick_every);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick fires immediately.
            tick.tick().await;
            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        remaining -= 1;
                        if remaining < 0 {
                            let _ = tx.send(DialogIn::TimerExpired { widget });
                            break;
                        }
                        let _ = tx.send(DialogIn::TimerTick {
                            widget: widget.clone(),
                            remaining_seconds: remaining as u64,
                        });
                    }
                    _ = &mut stop_rx => break,
                }
            }
        });
    }

    /// Stops the countdown task and forgets the widget.
    pub fn stop(&mut self, widget: &WidgetId) {
        if let Some(handle) = self.active.remove(widget) {
            let _ = handle.stop.send(());
        }
    }

    pub fn stop_all(&mut self) {
        for (_, handle) in self.active.drain() {
            let _ = handle.stop.send(());
        }
    }

    /// Forgets a widget whose task already exited on its own.
    pub fn release(&mut self, widget: &WidgetId) {
        self.active.remove(widget);
    }

    pub fn minutes(&self, widget: &WidgetId) -> Option<u32> {
        self.active.get(widget).map(|h| h.minutes)
    }

    pub fn is_running(&self, widget: &WidgetId) -> bool {
        self.active.contains_key(widget)
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// mm:ss display form used by timer widgets.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
