//! Component custom id parsing.
//!
//! Two formats exist. Older buttons encode `ACTION+DATA` directly in the custom id.
//! Everything newer stores context in the `interactions` table and uses the record
//! id as the custom id.

/// Actions understood in the `ACTION+DATA` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Switch the leaderboard page; data is the zero-based page
    LeaderboardChangePage,
}

impl ButtonAction {
    /// Prefix used in the custom id
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeaderboardChangePage => "LEADERBOARD_CHANGE_PAGE",
        }
    }

    /// Builds a custom id for this action.
    #[must_use]
    pub fn custom_id(self, data: &str) -> String {
        format!("{}+{}", self.as_str(), data)
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "LEADERBOARD_CHANGE_PAGE" => Some(Self::LeaderboardChangePage),
            _ => None,
        }
    }
}

/// Where a component interaction should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// `ACTION+DATA` button
    Action {
        /// Parsed action
        action: ButtonAction,
        /// Everything after the first `+`
        data: &'a str,
    },
    /// Custom id is an interaction record id
    Record(&'a str),
    /// Malformed `ACTION+DATA` custom id
    Invalid,
}

/// Message for malformed action buttons.
pub const INVALID_BUTTON_ACTION: &str = "Invalid button action";

/// Classifies a component custom id.
#[must_use]
pub fn route(custom_id: &str) -> Route<'_> {
    let Some((action, data)) = custom_id.split_once('+') else {
        return if custom_id.is_empty() {
            Route::Invalid
        } else {
            Route::Record(custom_id)
        };
    };

    if action.is_empty() || data.is_empty() {
        return Route::Invalid;
    }

    ButtonAction::parse(action).map_or(Route::Invalid, |action| Route::Action { action, data })
}
