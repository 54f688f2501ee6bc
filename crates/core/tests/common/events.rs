//! Helpers for observing processor events.

use a2ui_protocol::ipc::Event;
use tokio::sync::mpsc;

/// Drain every event currently buffered in the channel.
pub fn drain_events(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

/// Surface ids of the `SurfaceDeleted` events, in order.
#[allow(dead_code)]
pub fn deleted_surfaces(events: &[Event]) -> Vec<&str> {
    events
        .iter()
        .filter(|e| matches!(e, Event::SurfaceDeleted { .. }))
        .map(Event::surface_id)
        .collect()
}
