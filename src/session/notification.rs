use std::time::Duration;

/// How long a notification stays on screen before it dismisses itself.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Colour class of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationLevel {
    #[default]
    Primary,
    Success,
    Danger,
}

impl NotificationLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// Transient, auto-dismissing message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Danger)
    }
}
