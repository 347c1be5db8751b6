use serde::{Deserialize, Serialize};

/// Payload for `PATCH /{userId}/roles`: the role ids to assign.
///
/// The backend answers with one boolean per requested assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolesRequest {
    pub role_ids: Vec<String>,
}

impl AssignRolesRequest {
    /// Request assigning the given role ids.
    pub fn new(role_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            role_ids: role_ids.into_iter().map(Into::into).collect(),
        }
    }
}
