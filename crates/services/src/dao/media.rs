use std::collections::HashMap;

use bson::{doc, DateTime};
use classroom_db::models::{ConvertedImage, Media, MediaType};
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct MediaDao {
    pub base: BaseDao<Media>,
}

impl MediaDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Media::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        id: String,
        name: String,
        media_type: MediaType,
        resource: String,
        converted_image: Option<ConvertedImage>,
    ) -> DaoResult<Media> {
        let now = DateTime::now();
        let media = Media {
            id,
            name,
            media_type,
            resource,
            converted_image,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.base.insert_one(&media).await?;
        Ok(media)
    }

    /// Media for `ids`, in the order of `ids`. Unknown or deleted IDs are skipped.
    pub async fn find_by_ids(&self, ids: &[String]) -> DaoResult<Vec<Media>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = self
            .base
            .find_many(
                doc! { "_id": { "$in": ids.to_vec() }, "deleted_at": null },
                None,
            )
            .await?;

        let mut by_id: HashMap<String, Media> =
            found.into_iter().map(|m| (m.id.clone(), m)).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
