use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::team_models::{Team, TeamMember, TeamMemberInfo};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_teams_for_user(&self, user_id: Uuid) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            "SELECT t.* FROM teams t
             JOIN team_members tm ON tm.team_id = t.id
             WHERE tm.user_id = $1
             ORDER BY t.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn find_by_invite_code(&self, invite_code: &str) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE invite_code = $1")
            .bind(invite_code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(team)
    }

    pub async fn create_with_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
        description: &str,
        owner_id: Uuid,
        invite_code: &str,
    ) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            "INSERT INTO teams (name, description, owner_id, invite_code)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .bind(invite_code)
        .fetch_one(&mut **tx)
        .await?;

        Ok(team)
    }

    pub async fn add_member_with_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        team_id: Uuid,
        user_id: Uuid,
        role: &str,
    ) -> Result<TeamMember> {
        let member = sqlx::query_as::<_, TeamMember>(
            "INSERT INTO team_members (team_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&mut **tx)
        .await?;

        Ok(member)
    }

    pub async fn add_member(&self, team_id: Uuid, user_id: Uuid, role: &str) -> Result<TeamMember> {
        let member = sqlx::query_as::<_, TeamMember>(
            "INSERT INTO team_members (team_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    pub async fn find_member(&self, team_id: Uuid, user_id: Uuid) -> Result<Option<TeamMember>> {
        let member = sqlx::query_as::<_, TeamMember>(
            "SELECT * FROM team_members WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    pub async fn find_roster(&self, team_id: Uuid) -> Result<Vec<TeamMemberInfo>> {
        let members = sqlx::query_as::<_, TeamMemberInfo>(
            "SELECT tm.id, tm.user_id, tm.role, tm.joined_at, u.email, u.full_name
             FROM team_members tm
             JOIN users u ON u.id = tm.user_id
             WHERE tm.team_id = $1",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn count_members(&self, team_id: Uuid) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
                .bind(team_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
