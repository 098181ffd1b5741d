use bson::{doc, Bson, Document};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::PortError;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("BSON serialization error: {0}")]
    BsonSer(#[from] bson::ser::Error),
    #[error("BSON deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),
    #[error("Entity not found")]
    NotFound,
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("No rows updated: {0}")]
    NoRowsUpdated(String),
}

pub type DaoResult<T> = Result<T, DaoError>;

impl From<DaoError> for PortError {
    fn from(e: DaoError) -> Self {
        PortError::from(anyhow::Error::new(e))
    }
}

pub struct BaseDao<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T> BaseDao<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Unpin + Send + Sync,
{
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<T>(collection_name),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> DaoResult<T> {
        self.collection
            .find_one(doc! { "_id": id, "deleted_at": null })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn find_many(&self, filter: Document, sort: Option<Document>) -> DaoResult<Vec<T>> {
        let mut cursor = if let Some(sort) = sort {
            self.collection.find(filter).sort(sort).await?
        } else {
            self.collection.find(filter).await?
        };

        let mut results = Vec::new();
        use futures::TryStreamExt;
        while let Some(doc) = cursor.try_next().await? {
            results.push(doc);
        }
        Ok(results)
    }

    /// IDs of the documents matching `filter`, without decoding whole documents.
    pub async fn distinct_ids(&self, field: &str, filter: Document) -> DaoResult<Vec<String>> {
        let values = self.collection.distinct(field, filter).await?;
        Ok(values
            .into_iter()
            .filter_map(|v| match v {
                Bson::String(s) => Some(s),
                _ => None,
            })
            .collect())
    }

    pub async fn insert_one(&self, doc: &T) -> DaoResult<Bson> {
        let result = self.collection.insert_one(doc).await.map_err(|e| {
            if let mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
                ref write_error,
            )) = *e.kind
            {
                if write_error.code == 11000 {
                    return DaoError::DuplicateKey(write_error.message.clone());
                }
            }
            DaoError::Mongo(e)
        })?;

        debug!(id = %result.inserted_id, "Inserted document");
        Ok(result.inserted_id)
    }

    /// Applies `update` and stamps `updated_at`. Returns the matched count.
    pub async fn update_one(&self, filter: Document, update: Document) -> DaoResult<u64> {
        let result = self
            .collection
            .update_one(filter, with_timestamp(update))
            .await?;
        Ok(result.matched_count)
    }

    /// Like `update_one`, but a filter matching nothing is an error.
    pub async fn update_one_required(
        &self,
        filter: Document,
        update: Document,
        operation: &str,
    ) -> DaoResult<()> {
        match self.update_one(filter, update).await? {
            0 => Err(DaoError::NoRowsUpdated(operation.to_string())),
            _ => Ok(()),
        }
    }

    /// Applies `update` to every match and stamps `updated_at`. Returns the modified count.
    pub async fn update_many(&self, filter: Document, update: Document) -> DaoResult<u64> {
        let result = self
            .collection
            .update_many(filter, with_timestamp(update))
            .await?;
        Ok(result.modified_count)
    }

    pub async fn count(&self, filter: Document) -> DaoResult<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }
}

fn with_timestamp(mut update: Document) -> Document {
    if !update.contains_key("$set") {
        update.insert("$set", Document::new());
    }
    if let Ok(set_doc) = update.get_document_mut("$set") {
        set_doc.insert("updated_at", bson::DateTime::now());
    }
    update
}
