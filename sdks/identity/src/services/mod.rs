//! Resource clients: thin typed wrappers over the gateway, one per backend
//! resource family. Stateless; no retries, no caching, no cross-resource
//! orchestration.

mod roles;
mod tenants;
mod user_roles;
mod users;

pub use roles::RolesClient;
pub use tenants::TenantsClient;
pub use user_roles::UserRolesClient;
pub use users::UsersClient;
