use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ApiClientError;
use crate::models::{RoleDto, TenantDto, UserDto};
use crate::services::{RolesClient, TenantsClient, UserRolesClient, UsersClient};

/// The data the console renders on entry: current user, all roles, all
/// tenants.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub current_user: UserDto,
    pub roles: Vec<RoleDto>,
    pub tenants: Vec<TenantDto>,
}

/// Aggregate facade over the four resource clients.
///
/// Constructed once per authenticated session; all resource calls share
/// one gateway instance, so they share one credential-acquisition path and
/// one base configuration.
pub struct ApiService {
    client: Arc<ApiClient>,
    pub users: UsersClient,
    pub roles: RolesClient,
    pub tenants: TenantsClient,
    pub user_roles: UserRolesClient,
}

impl ApiService {
    /// Wrap a gateway in the full set of resource clients.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            users: UsersClient::new(Arc::clone(&client)),
            roles: RolesClient::new(Arc::clone(&client)),
            tenants: TenantsClient::new(Arc::clone(&client)),
            user_roles: UserRolesClient::new(Arc::clone(&client)),
            client,
        }
    }

    /// The underlying gateway, for ad-hoc calls not covered by a named
    /// resource operation.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Load the console entry data: current user, all roles and all
    /// tenants, issued concurrently.
    ///
    /// Fail-all semantics: if any read fails, the others' results are
    /// discarded and the first rejection (by settlement order) propagates.
    /// Flagged for product review — partial-success rendering may be the
    /// better experience, but today the whole screen blanks on any one
    /// failure.
    pub async fn load_overview(&self) -> Result<Overview, ApiClientError> {
        let (current_user, roles, tenants) = tokio::try_join!(
            self.users.current_user(),
            self.roles.all(),
            self.tenants.all(),
        )?;

        Ok(Overview {
            current_user,
            roles,
            tenants,
        })
    }
}
