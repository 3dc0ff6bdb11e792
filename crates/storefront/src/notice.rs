//! User-facing notices ("toasts") attached to API responses.

use serde::Serialize;

use threadline_core::{ListError, NoticeLevel};

/// A short message the client shows as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Rejected list mutations are warnings: nothing broke, the list is unchanged.
impl From<&ListError> for Notice {
    fn from(err: &ListError) -> Self {
        Self::warning(err.to_string())
    }
}

/// Body of an error response.
#[derive(Debug, Serialize)]
pub struct NoticeBody {
    pub notice: Notice,
}
