use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Member,
}

impl Role {
    /// Display precedence only; roles grant no extra access.
    pub fn precedence(self) -> u8 {
        match self {
            Role::Owner => 3,
            Role::Admin => 2,
            Role::Member => 1,
        }
    }

    pub fn parse(s: &str) -> Role {
        match s {
            "owner" => Role::Owner,
            "admin" => Role::Admin,
            _ => Role::Member,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamMember {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Membership row joined with the member's user record for roster display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamMemberInfo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub email: String,
    pub full_name: String,
}

/// Orders a roster for display: owner first, then admins, then members,
/// earliest joiner first within a role.
pub fn sort_roster_for_display(members: &mut [TeamMemberInfo]) {
    members.sort_by(|a, b| {
        Role::parse(&b.role)
            .precedence()
            .cmp(&Role::parse(&a.role).precedence())
            .then_with(|| a.joined_at.cmp(&b.joined_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn member(role: &str, joined_day: u32) -> TeamMemberInfo {
        TeamMemberInfo {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: role.to_string(),
            joined_at: Utc.with_ymd_and_hms(2025, 1, joined_day, 0, 0, 0).unwrap(),
            email: format!("{role}@example.com"),
            full_name: role.to_string(),
        }
    }

    #[test]
    fn test_role_precedence() {
        assert!(Role::Owner.precedence() > Role::Admin.precedence());
        assert!(Role::Admin.precedence() > Role::Member.precedence());
    }

    #[test]
    fn test_unknown_role_parses_as_member() {
        assert_eq!(Role::parse("superuser"), Role::Member);
    }

    #[test]
    fn test_roster_sorted_by_precedence_then_join_date() {
        let mut roster = vec![
            member("member", 1),
            member("owner", 5),
            member("admin", 3),
            member("member", 2),
        ];
        sort_roster_for_display(&mut roster);
        let roles: Vec<&str> = roster.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["owner", "admin", "member", "member"]);
        assert!(roster[2].joined_at < roster[3].joined_at);
    }
}
