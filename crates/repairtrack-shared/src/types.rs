use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Derived schedule status of a service order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    OnTime,
    Warning,
    Delayed,
}

impl Status {
    /// Fixed column order used by the kanban board and dashboard.
    pub const ALL: [Status; 3] = [Status::OnTime, Status::Warning, Status::Delayed];

    /// Stable string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::OnTime => "ontime",
            Status::Warning => "warning",
            Status::Delayed => "delayed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::OnTime => "On time",
            Status::Warning => "Due soon",
            Status::Delayed => "Delayed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ontime" => Ok(Status::OnTime),
            "warning" => Ok(Status::Warning),
            "delayed" => Ok(Status::Delayed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
