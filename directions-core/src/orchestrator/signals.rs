//! Outbound signals to the UI layer.
//!
//! These are the only side effects visible outside the core. The UI owns
//! the receiving end of an unbounded channel and reacts to each signal.

use geo::{BoundingRect, LineString, Rect};
use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::{HighlightSegment, LatLng};

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    /// A warning notification.
    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            title: title.into(),
            description: description.into(),
        }
    }

    /// An error notification.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    /// The "no addresses" warning shown when a lookup finds nothing.
    pub fn no_addresses() -> Self {
        Self::warning("No addresses", "Sorry, no addresses can be found.")
    }
}

/// Something the UI should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Fit the map viewport to this extent.
    FitViewport(Rect<f64>),
    /// Show a notification.
    Notify(Notification),
    /// Show or hide the loading indicator.
    Loading(bool),
    /// The highlighted route segment changed.
    HighlightChanged(HighlightSegment),
    /// The trip's permalink query string changed.
    PermalinkChanged(String),
}

/// Receiving end of the signal channel.
pub type SignalReceiver = mpsc::UnboundedReceiver<Signal>;

/// Sending end of the signal channel.
#[derive(Debug, Clone)]
pub struct SignalSink {
    tx: mpsc::UnboundedSender<Signal>,
}

impl SignalSink {
    /// Create a connected sink and receiver.
    pub fn channel() -> (Self, SignalReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Send a signal. Dropped silently if the UI has gone away.
    pub fn emit(&self, signal: Signal) {
        if let Err(e) = self.tx.send(signal) {
            trace!(signal = ?e.0, "signal receiver dropped");
        }
    }

    /// Shorthand for [`Signal::Notify`].
    pub fn notify(&self, notification: Notification) {
        self.emit(Signal::Notify(notification));
    }
}

/// The viewport that fits every point of a path, if it has any.
pub fn viewport(path: &[LatLng]) -> Option<Rect<f64>> {
    let line: LineString<f64> = path.iter().map(|ll| geo::Coord::from(*ll)).collect();
    line.bounding_rect()
}

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;

    #[test]
    fn viewport_covers_all_points() {
        let path = [
            LatLng::new(50.0, 10.0),
            LatLng::new(51.5, 9.0),
            LatLng::new(49.0, 11.25),
        ];

        let rect = viewport(&path).unwrap();
        assert_eq!(rect.min(), Coord { x: 9.0, y: 49.0 });
        assert_eq!(rect.max(), Coord { x: 11.25, y: 51.5 });
    }

    #[test]
    fn empty_path_has_no_viewport() {
        assert_eq!(viewport(&[]), None);
    }

    #[test]
    fn emit_after_receiver_dropped_is_harmless() {
        let (sink, rx) = SignalSink::channel();
        drop(rx);
        sink.emit(Signal::Loading(true));
    }

    #[test]
    fn signals_arrive_in_order() {
        let (sink, mut rx) = SignalSink::channel();
        sink.emit(Signal::Loading(true));
        sink.notify(Notification::no_addresses());

        assert_eq!(rx.try_recv().unwrap(), Signal::Loading(true));
        assert_eq!(
            rx.try_recv().unwrap(),
            Signal::Notify(Notification {
                kind: NotificationKind::Warning,
                title: "No addresses".into(),
                description: "Sorry, no addresses can be found.".into(),
            })
        );
        assert!(rx.try_recv().is_err());
    }
}
