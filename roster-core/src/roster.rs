//! Team and user management

use roster_db::{Database, NewUser, TeamRepository, UserRepository};

use crate::error::{ConflictKind, Resource};
use crate::model::{NewMember, Team, User};
use crate::{Error, Result};

/// Plain roster operations that never touch reviewer assignments
#[derive(Clone)]
pub struct RosterService {
    db: Database,
}

impl RosterService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a team together with all of its members
    ///
    /// Fails with [`ConflictKind::AlreadyExists`] when the team or any member
    /// ID already exists, including IDs repeated within `members`.
    pub async fn create_team(&self, team_name: &str, members: Vec<NewMember>) -> Result<Team> {
        if team_name.trim().is_empty() {
            return Err(Error::invalid_input("team_name is required"));
        }
        if members.is_empty() {
            return Err(Error::invalid_input("a team needs at least one member"));
        }
        for member in &members {
            if member.user_id.trim().is_empty() {
                return Err(Error::invalid_input("user_id is required"));
            }
            if member.username.trim().is_empty() {
                return Err(Error::invalid_input(format!(
                    "username is required for {}",
                    member.user_id
                )));
            }
        }

        let mut uow = self.db.begin().await?;

        if uow.teams().exists(team_name).await? {
            return Err(team_exists(team_name));
        }
        uow.teams().create(team_name).await.map_err(|e| {
            if e.is_unique_violation() {
                team_exists(team_name)
            } else {
                e.into()
            }
        })?;

        let mut created = Vec::with_capacity(members.len());
        for member in members {
            let user = uow
                .users()
                .create(&NewUser {
                    user_id: member.user_id.clone(),
                    username: member.username,
                    team_name: team_name.to_string(),
                    is_active: member.is_active,
                })
                .await
                .map_err(|e| {
                    if e.is_unique_violation() {
                        Error::conflict(
                            ConflictKind::AlreadyExists(Resource::User),
                            format!("user {} already exists", member.user_id),
                        )
                    } else {
                        e.into()
                    }
                })?;
            created.push(user);
        }
        uow.commit().await?;

        created.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        tracing::info!(team = team_name, members = created.len(), "Team created");

        Ok(Team {
            name: team_name.to_string(),
            members: created,
        })
    }

    /// Fetch a team and its members, ordered by user ID
    ///
    /// A blank name names no team and is reported as not found.
    pub async fn get_team(&self, team_name: &str) -> Result<Team> {
        if team_name.trim().is_empty() {
            return Err(Error::NotFound("team with empty name".to_string()));
        }

        let mut conn = self.db.acquire().await?;
        let members = TeamRepository::new(&mut conn)
            .members(team_name)
            .await?;
        if members.is_empty() {
            return Err(Error::NotFound(format!("team {}", team_name)));
        }

        Ok(Team {
            name: team_name.to_string(),
            members,
        })
    }

    /// Flip a single user's active flag
    ///
    /// Open reviews held by the user are left in place; use
    /// [`AssignmentEngine::deactivate_users`](crate::AssignmentEngine::deactivate_users)
    /// to hand them off.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User> {
        if user_id.trim().is_empty() {
            return Err(Error::invalid_input("user_id is required"));
        }

        let mut conn = self.db.acquire().await?;
        let user = UserRepository::new(&mut conn)
            .set_active(user_id, is_active)
            .await?;
        tracing::info!(user_id, is_active, "User activity updated");
        Ok(user)
    }
}

fn team_exists(team_name: &str) -> Error {
    Error::conflict(
        ConflictKind::AlreadyExists(Resource::Team),
        format!("team {} already exists", team_name),
    )
}
