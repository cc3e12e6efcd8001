use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            activities::ActivityCommandService, clients::ClientCommandService,
            users::UserCommandService,
        },
        dto::AuthenticatedUser,
        ports::{
            change_feed::ChangeFeed,
            security::{PasswordHasher, TokenManager},
            time::{Clock, OfficeTime},
        },
        queries::{
            activities::ActivityQueryService, clients::ClientQueryService,
            dashboard::DashboardQueryService, users::UserQueryService,
        },
    },
    domain::{activity::ActivityRepository, client::ClientRepository, user::UserRepository},
};

/// Repositories behind the services.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub activities: Arc<dyn ActivityRepository>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub client_commands: Arc<ClientCommandService>,
    pub activity_commands: Arc<ActivityCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub client_queries: Arc<ClientQueryService>,
    pub activity_queries: Arc<ActivityQueryService>,
    pub dashboard_queries: Arc<DashboardQueryService>,
    token_manager: Arc<dyn TokenManager>,
    change_feed: Arc<dyn ChangeFeed>,
    clock: Arc<dyn Clock>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        change_feed: Arc<dyn ChangeFeed>,
        clock: Arc<dyn Clock>,
        office_time: OfficeTime,
    ) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&change_feed),
            Arc::clone(&clock),
        ));
        let client_commands = Arc::new(ClientCommandService::new(
            Arc::clone(&repos.clients),
            Arc::clone(&change_feed),
            Arc::clone(&clock),
        ));
        let activity_commands = Arc::new(ActivityCommandService::new(
            Arc::clone(&repos.activities),
            Arc::clone(&repos.clients),
            Arc::clone(&repos.users),
            Arc::clone(&change_feed),
            Arc::clone(&clock),
        ));

        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&clock),
        ));
        let client_queries = Arc::new(ClientQueryService::new(Arc::clone(&repos.clients)));
        let activity_queries = Arc::new(ActivityQueryService::new(
            Arc::clone(&repos.activities),
            Arc::clone(&clock),
            office_time,
        ));
        let dashboard_queries = Arc::new(DashboardQueryService::new(Arc::clone(&repos.activities)));

        Self {
            user_commands,
            client_commands,
            activity_commands,
            user_queries,
            client_queries,
            activity_queries,
            dashboard_queries,
            token_manager,
            change_feed,
            clock,
        }
    }

    pub fn change_feed(&self) -> Arc<dyn ChangeFeed> {
        Arc::clone(&self.change_feed)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Verify a raw bearer token.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
