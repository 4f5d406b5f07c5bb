//! Notification channel value object

use std::fmt;

/// Channel id used for all pending-item reminders
pub const TEACHER_TASKS_CHANNEL_ID: &str = "teacher_tasks";

/// Importance of a channel, controlling how loudly its notifications surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Importance {
    Low,
    #[default]
    Default,
    High,
}

impl Importance {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Default => "default",
            Self::High => "high",
        }
    }

    /// Display priority a notification inherits from its channel
    pub const fn priority(&self) -> Priority {
        match self {
            Self::Low => Priority::Low,
            Self::Default => Priority::Default,
            Self::High => Priority::High,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display priority of a single notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Low,
    #[default]
    Default,
    High,
}

impl Priority {
    /// freedesktop urgency level name.
    ///
    /// High stays at normal: critical never expires and breaks through
    /// do-not-disturb, which is beyond what a reminder needs.
    pub const fn urgency_name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Default | Self::High => "normal",
        }
    }
}

/// A platform-level category grouping notifications.
/// Registering the same channel more than once is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub importance: Importance,
}

impl NotificationChannel {
    /// The "teacher tasks" channel, at high importance
    pub fn teacher_tasks() -> Self {
        Self {
            id: TEACHER_TASKS_CHANNEL_ID.to_string(),
            name: "Teacher Tasks".to_string(),
            description: "Reminders about pending bullying reports and ungraded literacy logs"
                .to_string(),
            importance: Importance::High,
        }
    }
}
