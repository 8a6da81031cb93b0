//! Host bridge: readiness signal, haptic feedback and optional device storage
//! supplied by whatever shell embeds the board.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::io::KeyValueStore;

/// Strength of an impact haptic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    Medium,
}

/// Tone of a notification haptic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
}

/// Feedback requested through the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Impact(ImpactStyle),
    Notification(NotificationKind),
}

pub trait HostBridge {
    /// Called once after start-up finished.
    fn ready(&mut self);

    fn impact_occurred(&mut self, style: ImpactStyle);

    fn notification_occurred(&mut self, kind: NotificationKind);

    /// Host-provided storage, preferred over the local store when present.
    fn device_storage(&mut self) -> Option<&mut dyn KeyValueStore> {
        None
    }
}

/// How long a haptic pulse stays visible on the desktop.
const PULSE_DURATION: Duration = Duration::from_millis(220);

/// Desktop shell bridge. There is no vibration motor, so haptics become a
/// short accent pulse the UI paints around the window.
#[derive(Debug, Default)]
pub struct DesktopBridge {
    pulse: Option<(Haptic, Instant)>,
}

impl DesktopBridge {
    pub fn new() -> Self {
        Self::default()
    }

    fn pulse(&mut self, haptic: Haptic) {
        debug!(?haptic, "haptic feedback");
        self.pulse = Some((haptic, Instant::now()));
    }

    /// The pulse still on screen at `now`, with its remaining strength (1.0 to 0.0).
    pub fn active_pulse(&self, now: Instant) -> Option<(Haptic, f32)> {
        let (haptic, at) = self.pulse?;
        let age = now.saturating_duration_since(at);
        if age >= PULSE_DURATION {
            return None;
        }
        Some((haptic, 1.0 - age.as_secs_f32() / PULSE_DURATION.as_secs_f32()))
    }
}

impl HostBridge for DesktopBridge {
    fn ready(&mut self) {
        info!("desktop bridge ready");
    }

    fn impact_occurred(&mut self, style: ImpactStyle) {
        self.pulse(Haptic::Impact(style));
    }

    fn notification_occurred(&mut self, kind: NotificationKind) {
        self.pulse(Haptic::Notification(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_fades_out() {
        let mut bridge = DesktopBridge::new();
        let start = Instant::now();
        assert!(bridge.active_pulse(start).is_none());

        bridge.notification_occurred(NotificationKind::Success);
        let (haptic, strength) = bridge
            .active_pulse(Instant::now())
            .expect("pulse visible right away");
        assert_eq!(haptic, Haptic::Notification(NotificationKind::Success));
        assert!(strength > 0.0 && strength <= 1.0);

        assert!(bridge.active_pulse(Instant::now() + PULSE_DURATION).is_none());
    }

    #[test]
    fn desktop_bridge_has_no_device_storage() {
        let mut bridge = DesktopBridge::new();
        assert!(bridge.device_storage().is_none());
    }
}
