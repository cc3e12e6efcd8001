use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityId(pub i64);

impl ActivityId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("activity id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ActivityId> for i64 {
    fn from(value: ActivityId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("subject is required"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Subject> for String {
    fn from(value: Subject) -> Self {
        value.0
    }
}

/// Folds a label or identifier to a comparable key: "In-Person Meeting",
/// "in_person_meeting" and "inpersonmeeting" all normalise alike.
fn label_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => $label:literal, alias $alias:literal $(, $default:ident)?;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                $(#[$default])?
                #[serde(rename = $label, alias = $alias)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = label_key(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| label_key(candidate.as_str()) == key)
                    .ok_or_else(|| DomainError::Validation(format!("unknown {} '{s}'", $what)))
            }
        }
    };
}

labelled_enum! {
    /// How the client interaction happened.
    ContactMethod, "contact method" {
        Phone => "Phone", alias "phone", default;
        Email => "Email", alias "email";
        InPersonMeeting => "In-Person Meeting", alias "in_person_meeting";
        VirtualMeeting => "Virtual Meeting", alias "virtual_meeting";
        DocumentSubmission => "Document Submission", alias "document_submission";
        InternalTask => "Internal Task", alias "internal_task";
    }
}

labelled_enum! {
    Direction, "direction" {
        Incoming => "Incoming", alias "incoming", default;
        Outgoing => "Outgoing", alias "outgoing";
        NotApplicable => "N/A", alias "not_applicable";
    }
}

labelled_enum! {
    ActivityStatus, "status" {
        Open => "Open", alias "open", default;
        InProgress => "In Progress", alias "in_progress";
        Resolved => "Resolved", alias "resolved";
        NeedsFollowUp => "Needs Follow-up", alias "needs_follow_up";
        WaitingForClient => "Waiting for Client", alias "waiting_for_client";
    }
}

labelled_enum! {
    Priority, "priority" {
        High => "High", alias "high";
        Medium => "Medium", alias "medium", default;
        Low => "Low", alias "low";
    }
}

/// Colour family a status badge is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Warning,
    Info,
    Success,
    Danger,
    Accent,
}

impl ActivityStatus {
    /// Order in which dashboard cards are shown.
    pub const DASHBOARD_ORDER: [ActivityStatus; 5] = [
        ActivityStatus::Open,
        ActivityStatus::InProgress,
        ActivityStatus::NeedsFollowUp,
        ActivityStatus::WaitingForClient,
        ActivityStatus::Resolved,
    ];

    pub fn tone(&self) -> StatusTone {
        match self {
            ActivityStatus::Open => StatusTone::Warning,
            ActivityStatus::InProgress => StatusTone::Info,
            ActivityStatus::Resolved => StatusTone::Success,
            ActivityStatus::NeedsFollowUp => StatusTone::Danger,
            ActivityStatus::WaitingForClient => StatusTone::Accent,
        }
    }
}

impl Priority {
    /// Low < Medium < High.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}
