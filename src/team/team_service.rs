use uuid::Uuid;

use super::team_dto::TeamResponse;
use super::team_models::{self, Role, Team, TeamMember, TeamMemberInfo};
use super::team_repository::TeamRepository;
use crate::db::DbPool;
use crate::error::{AppError, Result};

pub const INVITE_CODE_LEN: usize = 8;

/// Fresh fixed-length invite code; uniqueness is enforced by the database
/// constraint on teams.invite_code.
pub fn generate_invite_code() -> String {
    Uuid::new_v4().simple().to_string()[..INVITE_CODE_LEN].to_uppercase()
}

/// Join guard over the two lookups: no team for the code is NotFound, an
/// existing membership is AlreadyMember, otherwise the team to join.
fn check_join(team: Option<Team>, membership: Option<TeamMember>) -> Result<Team> {
    let team = team.ok_or_else(|| AppError::NotFound("Invalid invite code".into()))?;

    if membership.is_some() {
        return Err(AppError::AlreadyMember(
            "You are already a member of this team".into(),
        ));
    }

    Ok(team)
}

#[derive(Clone)]
pub struct TeamService {
    db: DbPool,
    repo: TeamRepository,
}

impl TeamService {
    pub fn new(db: DbPool, repo: TeamRepository) -> Self {
        Self { db, repo }
    }

    /// Creates the team and its owner membership in one transaction, so a
    /// failed membership insert can never leave an orphaned team behind.
    pub async fn create_team(
        &self,
        user_id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Team> {
        let invite_code = generate_invite_code();

        let mut tx = self.db.begin().await?;

        let team = self
            .repo
            .create_with_tx(&mut tx, name, description, user_id, &invite_code)
            .await?;

        self.repo
            .add_member_with_tx(&mut tx, team.id, user_id, &Role::Owner.to_string())
            .await?;

        tx.commit().await?;

        Ok(team)
    }

    pub async fn join_team(&self, user_id: Uuid, invite_code: &str) -> Result<(Team, TeamMember)> {
        let team = self.repo.find_by_invite_code(invite_code.trim()).await?;

        let membership = match &team {
            Some(team) => self.repo.find_member(team.id, user_id).await?,
            None => None,
        };

        let team = check_join(team, membership)?;

        let member = self
            .repo
            .add_member(team.id, user_id, &Role::Member.to_string())
            .await?;

        Ok((team, member))
    }

    /// Teams the caller belongs to, each with its member count. The count is
    /// a separate read per team.
    pub async fn list_teams(&self, user_id: Uuid) -> Result<Vec<TeamResponse>> {
        let teams = self.repo.find_teams_for_user(user_id).await?;

        let mut responses = Vec::with_capacity(teams.len());
        for team in teams {
            let member_count = self.repo.count_members(team.id).await?;
            responses.push(TeamResponse { team, member_count });
        }

        Ok(responses)
    }

    /// Roster for a team the caller belongs to; any member may read it.
    pub async fn roster(&self, user_id: Uuid, team_id: Uuid) -> Result<Vec<TeamMemberInfo>> {
        self.repo
            .find_member(team_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

        let mut members = self.repo.find_roster(team_id).await?;
        team_models::sort_roster_for_display(&mut members);
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_code_is_fixed_length_uppercase() {
        let code = generate_invite_code();
        assert_eq!(code.len(), INVITE_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_invite_codes_differ() {
        assert_ne!(generate_invite_code(), generate_invite_code());
    }

    fn team() -> Team {
        Team {
            id: Uuid::new_v4(),
            name: "Ops".to_string(),
            description: String::new(),
            owner_id: Uuid::new_v4(),
            invite_code: "ABCD1234".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    fn membership(team_id: Uuid) -> TeamMember {
        TeamMember {
            id: Uuid::new_v4(),
            team_id,
            user_id: Uuid::new_v4(),
            role: Role::Member.to_string(),
            joined_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_join_unknown_invite_code_is_not_found() {
        let err = check_join(None, None).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_join_existing_member_is_already_member() {
        let team = team();
        let existing = membership(team.id);
        let err = check_join(Some(team), Some(existing)).unwrap_err();
        assert!(matches!(err, AppError::AlreadyMember(_)));
    }

    #[test]
    fn test_join_new_member_passes_guard() {
        let team = team();
        let joined = check_join(Some(team.clone()), None).unwrap();
        assert_eq!(joined.id, team.id);
    }
}
