use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::team_models::Team;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct JoinTeamRequest {
    #[validate(length(min = 1))]
    pub invite_code: String,
}

/// A team plus its member-count rollup.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamResponse {
    #[serde(flatten)]
    pub team: Team,
    pub member_count: i64,
}
