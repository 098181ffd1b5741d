use async_trait::async_trait;
use bson::{doc, DateTime};
use classroom_db::models::{User, UserGroup};
use mongodb::Database;
use tracing::debug;

use super::base::{BaseDao, DaoResult};
use crate::domain::{PortResult, Presence, UserModulePort};

pub struct UserDao {
    pub base: BaseDao<User>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        id: String,
        name: String,
        email: String,
        user_group: UserGroup,
    ) -> DaoResult<User> {
        let now = DateTime::now();
        let user = User {
            id,
            name,
            email,
            user_group,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.base.insert_one(&user).await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> DaoResult<User> {
        self.base.find_by_id(id).await
    }

    /// Requested IDs that belong to a live (not deleted) user.
    pub async fn find_existing_ids(&self, user_ids: &[String]) -> DaoResult<Vec<String>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.base
            .distinct_ids("_id", doc! { "_id": { "$in": user_ids.to_vec() }, "deleted_at": null })
            .await
    }
}

#[async_trait]
impl UserModulePort for UserDao {
    async fn check_existed_user_ids(&self, user_ids: &[String]) -> PortResult<Presence> {
        let found = self.find_existing_ids(user_ids).await?;
        debug!(requested = user_ids.len(), found = found.len(), "Checked user ids");
        Ok(Presence::from_found(user_ids, found))
    }
}
