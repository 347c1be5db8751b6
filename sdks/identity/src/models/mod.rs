//! Wire records mirroring the backend schema.
//!
//! Plain structured data: no identity beyond field equality, camelCase
//! names on the wire, owned entirely by the response that produced them.

mod role;
mod tenant;
mod user;
mod user_role;

pub use role::{PermissionDto, RoleDto};
pub use tenant::{CreateTenantRequest, TenantDto, UpdateTenantRequest, UsState};
pub use user::{CreateUserRequest, UpdateUserRequest, UserDto};
pub use user_role::AssignRolesRequest;
