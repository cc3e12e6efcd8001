use crate::domain::activity::value_objects::{
    ActivityId, ActivityStatus, ContactMethod, Direction, Priority, Subject,
};
use crate::domain::client::{Client, ClientId};
use crate::domain::user::{User, UserId};
use chrono::{DateTime, Utc};

/// Client id and name copied into an activity when it is saved. Renaming the
/// client later does not touch existing activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSnapshot {
    pub id: ClientId,
    pub name: String,
}

impl From<&Client> for ClientSnapshot {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    pub id: UserId,
    pub name: String,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.user_name.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Activity {
    pub id: ActivityId,
    pub activity_at: DateTime<Utc>,
    pub client: ClientSnapshot,
    pub contact_person: Option<String>,
    pub contact_method: ContactMethod,
    pub direction: Direction,
    pub subject: Subject,
    pub details: Option<String>,
    pub action_taken: Option<String>,
    pub status: ActivityStatus,
    pub priority: Priority,
    pub follow_up_at: Option<DateTime<Utc>>,
    pub assignee: Option<UserSnapshot>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserSnapshot>,
    pub last_modified_at: DateTime<Utc>,
    pub modified_by: Option<UserSnapshot>,
}

impl Activity {
    pub fn is_resolved(&self) -> bool {
        self.status == ActivityStatus::Resolved
    }

    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assignee.as_ref().is_some_and(|a| a.id == user_id)
    }
}

/// The fields captured by the log-activity form, already validated.
#[derive(Debug, Clone)]
pub struct ActivityDraft {
    pub activity_at: DateTime<Utc>,
    pub client: ClientSnapshot,
    pub contact_person: Option<String>,
    pub contact_method: ContactMethod,
    pub direction: Direction,
    pub subject: Subject,
    pub details: Option<String>,
    pub action_taken: Option<String>,
    pub status: ActivityStatus,
    pub priority: Priority,
    pub follow_up_at: Option<DateTime<Utc>>,
    pub assignee: Option<UserSnapshot>,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub draft: ActivityDraft,
    pub created_at: DateTime<Utc>,
    pub created_by: UserSnapshot,
}

/// Replaces the form fields of an existing activity. Creation stamps are kept
/// by the store.
#[derive(Debug, Clone)]
pub struct ActivityUpdate {
    pub id: ActivityId,
    pub draft: ActivityDraft,
    pub modified_at: DateTime<Utc>,
    pub modified_by: UserSnapshot,
}

impl NewActivity {
    /// Materialise the stored row; used by stores that assign ids themselves.
    pub fn into_activity(self, id: ActivityId) -> Activity {
        let NewActivity {
            draft,
            created_at,
            created_by,
        } = self;
        Activity {
            id,
            activity_at: draft.activity_at,
            client: draft.client,
            contact_person: draft.contact_person,
            contact_method: draft.contact_method,
            direction: draft.direction,
            subject: draft.subject,
            details: draft.details,
            action_taken: draft.action_taken,
            status: draft.status,
            priority: draft.priority,
            follow_up_at: draft.follow_up_at,
            assignee: draft.assignee,
            created_at,
            created_by: Some(created_by),
            last_modified_at: created_at,
            modified_by: None,
        }
    }
}

impl ActivityUpdate {
    pub fn apply_to(self, activity: &mut Activity) {
        let ActivityUpdate {
            id: _,
            draft,
            modified_at,
            modified_by,
        } = self;
        activity.activity_at = draft.activity_at;
        activity.client = draft.client;
        activity.contact_person = draft.contact_person;
        activity.contact_method = draft.contact_method;
        activity.direction = draft.direction;
        activity.subject = draft.subject;
        activity.details = draft.details;
        activity.action_taken = draft.action_taken;
        activity.status = draft.status;
        activity.priority = draft.priority;
        activity.follow_up_at = draft.follow_up_at;
        activity.assignee = draft.assignee;
        activity.last_modified_at = modified_at;
        activity.modified_by = Some(modified_by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft(subject: &str) -> ActivityDraft {
        ActivityDraft {
            activity_at: Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap(),
            client: ClientSnapshot {
                id: ClientId::new(7).unwrap(),
                name: "Acme Ltd".into(),
            },
            contact_person: None,
            contact_method: ContactMethod::default(),
            direction: Direction::default(),
            subject: Subject::new(subject).unwrap(),
            details: None,
            action_taken: None,
            status: ActivityStatus::default(),
            priority: Priority::default(),
            follow_up_at: None,
            assignee: None,
        }
    }

    fn jane() -> UserSnapshot {
        UserSnapshot {
            id: UserId::new(1).unwrap(),
            name: "Jane".into(),
        }
    }

    #[test]
    fn new_activity_stamps_creator() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let activity = NewActivity {
            draft: draft("Payroll query"),
            created_at,
            created_by: jane(),
        }
        .into_activity(ActivityId::new(1).unwrap());

        assert_eq!(activity.created_by, Some(jane()));
        assert_eq!(activity.last_modified_at, created_at);
        assert!(activity.modified_by.is_none());
    }

    #[test]
    fn update_keeps_creation_stamps() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let mut activity = NewActivity {
            draft: draft("Payroll query"),
            created_at,
            created_by: jane(),
        }
        .into_activity(ActivityId::new(1).unwrap());

        let later = created_at + chrono::Duration::hours(2);
        let editor = UserSnapshot {
            id: UserId::new(2).unwrap(),
            name: "Omar".into(),
        };
        let mut edited = draft("Payroll query answered");
        edited.status = ActivityStatus::Resolved;
        ActivityUpdate {
            id: activity.id,
            draft: edited,
            modified_at: later,
            modified_by: editor.clone(),
        }
        .apply_to(&mut activity);

        assert_eq!(activity.subject.as_str(), "Payroll query answered");
        assert!(activity.is_resolved());
        assert_eq!(activity.created_at, created_at);
        assert_eq!(activity.created_by, Some(jane()));
        assert_eq!(activity.last_modified_at, later);
        assert_eq!(activity.modified_by, Some(editor));
    }
}
