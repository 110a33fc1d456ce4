//! Formatting profiles applied to to-dos before export

use serde::{Deserialize, Serialize};

use crate::basecamp::Todo;
use crate::zipline;

/// Named transformation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Export to-dos exactly as fetched
    #[default]
    Default,
    /// Rewrite people and descriptions for the Zipline Jira import
    Zipline,
}

impl Profile {
    /// Look up a profile by name
    ///
    /// Unknown names resolve to [`Profile::Default`]; use [`Profile::is_known`]
    /// to tell the caller about it.
    pub fn from_name(name: &str) -> Self {
        match name {
            "zipline" => Profile::Zipline,
            _ => Profile::Default,
        }
    }

    /// Whether `name` is a recognised profile name
    pub fn is_known(name: &str) -> bool {
        matches!(name, "default" | "zipline")
    }

    /// Whether the profile reads comment threads
    pub fn needs_comments(self) -> bool {
        matches!(self, Profile::Zipline)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Default => "default",
            Profile::Zipline => "zipline",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a profile to every to-do, keeping input order
pub fn transform(todos: Vec<Todo>, profile: Profile) -> Vec<Todo> {
    match profile {
        Profile::Default => todos,
        Profile::Zipline => todos.into_iter().map(zipline::format_todo).collect(),
    }
}
