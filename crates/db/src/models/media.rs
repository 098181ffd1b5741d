use bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub media_type: MediaType,
    /// Video ID for videos, file URL for PDFs.
    #[serde(default)]
    pub resource: String,
    pub converted_image: Option<ConvertedImage>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Video,
    Pdf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedImage {
    pub width: u32,
    pub height: u32,
    pub image_url: String,
}

impl Media {
    pub const COLLECTION: &'static str = "media";
}
