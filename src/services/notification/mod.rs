use anyhow::Result;
use notify_rust::{Notification, Timeout};

/// Something that can put a reminder in front of the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// False when the user has turned notifications off.
    fn is_enabled(&self) -> bool;

    fn notify(&self, title: &str, body: &str, urgency: NotificationUrgency) -> Result<()>;
}

/// Notification urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationUrgency {
    Normal,
    Critical,
}

impl NotificationUrgency {
    fn timeout(self) -> Timeout {
        match self {
            NotificationUrgency::Normal => Timeout::Milliseconds(5000),
            NotificationUrgency::Critical => Timeout::Milliseconds(10000),
        }
    }
}

/// Desktop notifications through the platform notification daemon.
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for DesktopNotifier {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn notify(&self, title: &str, body: &str, urgency: NotificationUrgency) -> Result<()> {
        if !self.enabled {
            log::debug!("Notifications disabled, skipping '{}'", title);
            return Ok(());
        }

        Notification::new()
            .summary(title)
            .body(body)
            .timeout(urgency.timeout())
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(())
    }
}
