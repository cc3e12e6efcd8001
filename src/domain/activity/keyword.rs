use crate::domain::activity::entity::Activity;

/// Free-text filter over client name, subject and details. Matching is a
/// case-insensitive substring test and runs after the store query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    /// Blank input means "no keyword". Surrounding spaces are part of the
    /// needle otherwise.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        let needle = self.0.as_str();
        activity.client.name.to_lowercase().contains(needle)
            || activity.subject.as_str().to_lowercase().contains(needle)
            || activity
                .details
                .as_deref()
                .is_some_and(|details| details.to_lowercase().contains(needle))
    }

    pub fn retain(&self, mut activities: Vec<Activity>) -> Vec<Activity> {
        activities.retain(|a| self.matches(a));
        activities
    }
}
