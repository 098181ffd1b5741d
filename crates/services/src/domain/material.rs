use std::fmt;

use super::error::{DomainError, DomainResult, ResultExt};

pub use classroom_db::models::ConvertedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Video,
    Pdf,
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialKind::Video => f.write_str("video"),
            MaterialKind::Pdf => f.write_str("pdf"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoMaterial {
    pub id: String,
    pub name: String,
    pub video_id: String,
}

impl VideoMaterial {
    pub fn is_valid(&self) -> DomainResult<()> {
        if self.id.is_empty() {
            return Err(DomainError::invalid("material id cannot be empty"));
        }
        if self.video_id.is_empty() {
            return Err(DomainError::invalid(format!(
                "video id of material {} cannot be empty",
                self.id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfMaterial {
    pub id: String,
    pub name: String,
    pub url: String,
    pub converted_image: Option<ConvertedImage>,
}

impl PdfMaterial {
    pub fn is_valid(&self) -> DomainResult<()> {
        if self.id.is_empty() {
            return Err(DomainError::invalid("material id cannot be empty"));
        }
        if self.url.is_empty() {
            return Err(DomainError::invalid(format!(
                "url of material {} cannot be empty",
                self.id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Video(VideoMaterial),
    Pdf(PdfMaterial),
}

impl Material {
    pub fn id(&self) -> &str {
        match self {
            Material::Video(m) => &m.id,
            Material::Pdf(m) => &m.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Material::Video(m) => &m.name,
            Material::Pdf(m) => &m.name,
        }
    }

    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Video(_) => MaterialKind::Video,
            Material::Pdf(_) => MaterialKind::Pdf,
        }
    }

    pub fn is_valid(&self) -> DomainResult<()> {
        match self {
            Material::Video(m) => m.is_valid(),
            Material::Pdf(m) => m.is_valid(),
        }
    }
}

impl From<VideoMaterial> for Material {
    fn from(material: VideoMaterial) -> Self {
        Material::Video(material)
    }
}

impl From<PdfMaterial> for Material {
    fn from(material: PdfMaterial) -> Self {
        Material::Pdf(material)
    }
}

/// Ordered list of materials available in a room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Materials(Vec<Material>);

impl Materials {
    pub fn new(materials: Vec<Material>) -> Self {
        Self(materials)
    }

    pub fn is_valid(&self) -> DomainResult<()> {
        for (i, material) in self.0.iter().enumerate() {
            material
                .is_valid()
                .with_context(|| format!("invalid material at index {i}"))?;
        }
        Ok(())
    }

    /// Video material at `i`, or `None` when out of range or not a video.
    pub fn get_video_material_element(&self, i: usize) -> Option<&VideoMaterial> {
        match self.0.get(i) {
            Some(Material::Video(m)) => Some(m),
            _ => None,
        }
    }

    /// PDF material at `i`, or `None` when out of range or not a PDF.
    pub fn get_pdf_material_element(&self, i: usize) -> Option<&PdfMaterial> {
        match self.0.get(i) {
            Some(Material::Pdf(m)) => Some(m),
            _ => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Material> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, material: impl Into<Material>) {
        self.0.push(material.into());
    }
}

impl From<Vec<Material>> for Materials {
    fn from(materials: Vec<Material>) -> Self {
        Self(materials)
    }
}

impl FromIterator<Material> for Materials {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Materials {
    type Item = &'a Material;
    type IntoIter = std::slice::Iter<'a, Material>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
