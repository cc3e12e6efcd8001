use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Issues and verifies Ed25519-signed Biscuit bearer tokens.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
        })
    }
}

fn build_code_and_params(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> (String, HashMap<String, Term>) {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), i64::from(subject.user_id).into());
    params.insert("uname".to_string(), subject.user_name.clone().into());
    params.insert("urole".to_string(), subject.role.as_str().into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());

    let mut code = String::from(
        r#"
        user({uid}, {uname});
        role({urole});
        issued_at({issued});
        expires_at({exp});
        check if time($now), $now >= {issued};
        check if time($now), $now <= {exp};
        "#,
    );

    let mut rights: Vec<_> = subject.capabilities.iter().collect();
    rights.sort_by(|a, b| (&a.resource, &a.action).cmp(&(&b.resource, &b.action)));
    for (index, cap) in rights.into_iter().enumerate() {
        let res_key = format!("res{index}");
        let act_key = format!("act{index}");
        code.push_str(&format!("right({{{res_key}}}, {{{act_key}}});\n"));
        params.insert(res_key, cap.resource.clone().into());
        params.insert(act_key, cap.action.clone().into());
    }

    (code, params)
}

fn build_and_serialize_biscuit(
    code: &str,
    params: HashMap<String, Term>,
    root: &KeyPair,
) -> ApplicationResult<String> {
    let token = Biscuit::builder()
        .code_with_params(code, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

fn ttl_to_expires_in_seconds(ttl: Duration) -> i64 {
    ChronoDuration::from_std(ttl)
        .unwrap_or_else(|_| ChronoDuration::seconds(ttl.as_secs() as i64))
        .num_seconds()
        .max(0)
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;
        let (code, params) = build_code_and_params(&subject, issued_at, expires_at);

        let token = build_and_serialize_biscuit(&code, params, self.root.as_ref())?;

        Ok(AuthTokenDto {
            token,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: ttl_to_expires_in_seconds(self.ttl),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if user($id, $name)")
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let (facts, _, _, _) = authorizer.dump();
        super::claims::parse_claims(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserId};

    fn manager(ttl: Duration) -> BiscuitTokenManager {
        let keypair = KeyPair::new();
        BiscuitTokenManager::new(&keypair.private().to_bytes_hex(), ttl).unwrap()
    }

    fn subject() -> TokenSubject {
        TokenSubject {
            user_id: UserId::new(42).unwrap(),
            user_name: "Jane \"JD\" Doe".into(),
            role: Role::Staff,
            capabilities: Role::Staff.default_capabilities(),
        }
    }

    #[tokio::test]
    async fn issued_token_authenticates() {
        let tokens = manager(Duration::from_secs(600));
        let issued = tokens.issue(subject()).await.unwrap();
        assert_eq!(issued.expires_in, 600);

        let user = tokens.authenticate(&issued.token).await.unwrap();
        assert_eq!(user.id, UserId::new(42).unwrap());
        assert_eq!(user.user_name, "Jane \"JD\" Doe");
        assert_eq!(user.role, Role::Staff);
        assert!(user.has_capability("activities", "delete"));
    }

    #[tokio::test]
    async fn token_from_another_key_is_rejected() {
        let issued = manager(Duration::from_secs(600))
            .issue(subject())
            .await
            .unwrap();
        let err = manager(Duration::from_secs(600))
            .authenticate(&issued.token)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn garbage_is_unauthorized() {
        let err = manager(Duration::from_secs(60))
            .authenticate("not-a-token")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
