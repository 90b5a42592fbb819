use serde::Serialize;

/// Response for the delete route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}
