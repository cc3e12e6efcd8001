use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rebuild the caller from the facts carried by a verified token.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);

    let missing = |what: &str| ApplicationError::unauthorized(format!("token is missing {what}"));
    let user_id = ctx.user_id.ok_or_else(|| missing("user id"))?;
    let user_name = ctx.user_name.ok_or_else(|| missing("user name"))?;
    let role = ctx.role.ok_or_else(|| missing("role"))?;
    let issued_at = ctx.issued_at.ok_or_else(|| missing("issued_at"))?;
    let expires_at = ctx.expires_at.ok_or_else(|| missing("expires_at"))?;

    let id = UserId::new(user_id).map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

    // Rights in the token can only narrow what the role already grants.
    let granted = role.default_capabilities();
    let capabilities = if ctx.capabilities.is_empty() {
        granted
    } else {
        ctx.capabilities.intersection(&granted).cloned().collect()
    };

    Ok(AuthenticatedUser {
        id,
        user_name,
        role,
        capabilities,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    user_name: Option<String>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    capabilities: HashSet<Capability>,
}

fn as_date(term: Option<&Term>) -> Option<SystemTime> {
    match term {
        Some(Term::Date(seconds)) => Some(UNIX_EPOCH + Duration::from_secs(*seconds)),
        _ => None,
    }
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: Predicate) {
        let terms = predicate.terms.as_slice();
        match (predicate.name.as_str(), terms) {
            ("user", [Term::Integer(id), Term::Str(name)]) => {
                self.user_id = Some(*id);
                self.user_name = Some(name.clone());
            }
            ("role", [Term::Str(role)]) => {
                self.role = role.parse().ok();
            }
            ("issued_at", _) => self.issued_at = as_date(terms.first()),
            ("expires_at", _) => self.expires_at = as_date(terms.first()),
            ("right", [Term::Str(resource), Term::Str(action)]) => {
                self.capabilities
                    .insert(Capability::new(resource.clone(), action.clone()));
            }
            _ => {}
        }
    }
}
