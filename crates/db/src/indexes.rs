use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

use crate::models::{Lesson, LessonMember, Media, User};

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Lessons
    create_indexes(
        db,
        Lesson::COLLECTION,
        vec![
            index(bson::doc! { "center_id": 1, "start_time": -1 }),
            index(bson::doc! { "course_id": 1 }),
            index(bson::doc! { "room_id": 1 }),
        ],
    )
    .await?;

    // Lesson members
    create_indexes(
        db,
        LessonMember::COLLECTION,
        vec![
            index_unique(bson::doc! { "lesson_id": 1, "user_id": 1 }),
            index(bson::doc! { "user_id": 1 }),
        ],
    )
    .await?;

    // Media
    create_indexes(
        db,
        Media::COLLECTION,
        vec![index(bson::doc! { "media_type": 1 })],
    )
    .await?;

    // Users
    create_indexes(
        db,
        User::COLLECTION,
        vec![
            index_unique(bson::doc! { "email": 1 }),
            index(bson::doc! { "user_group": 1 }),
        ],
    )
    .await?;

    Ok(())
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    info!(collection, "Indexes created");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}
