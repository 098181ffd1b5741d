use chrono::{DateTime, Utc};
use std::time::Duration;

use super::error::{DomainError, DomainResult, ResultExt};
use super::material::{Material, MaterialKind, PdfMaterial, VideoMaterial};

pub use classroom_db::models::PlayerState;

#[derive(Debug, Clone, PartialEq)]
pub struct VideoState {
    pub current_time: Duration,
    pub player_state: PlayerState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoPresentMaterialState {
    pub material: Option<VideoMaterial>,
    pub updated_at: DateTime<Utc>,
    pub video_state: Option<VideoState>,
}

impl VideoPresentMaterialState {
    pub fn is_valid(&self) -> DomainResult<()> {
        let material = self
            .material
            .as_ref()
            .ok_or_else(|| DomainError::invalid("presented video material cannot be empty"))?;
        material.is_valid().context("invalid presented video material")?;

        let video_state = self
            .video_state
            .as_ref()
            .ok_or_else(|| DomainError::invalid("video state cannot be empty"))?;
        if video_state.player_state == PlayerState::Unspecified {
            return Err(DomainError::invalid("player state of video cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfPresentMaterialState {
    pub material: Option<PdfMaterial>,
    pub updated_at: DateTime<Utc>,
}

impl PdfPresentMaterialState {
    pub fn is_valid(&self) -> DomainResult<()> {
        let material = self
            .material
            .as_ref()
            .ok_or_else(|| DomainError::invalid("presented pdf material cannot be empty"))?;
        material.is_valid().context("invalid presented pdf material")
    }
}

/// Material currently shown to the room, with its player state.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentMaterialState {
    Video(VideoPresentMaterialState),
    Pdf(PdfPresentMaterialState),
}

impl PresentMaterialState {
    pub fn is_valid(&self) -> DomainResult<()> {
        match self {
            PresentMaterialState::Video(state) => state.is_valid(),
            PresentMaterialState::Pdf(state) => state.is_valid(),
        }
    }

    pub fn kind(&self) -> MaterialKind {
        match self {
            PresentMaterialState::Video(_) => MaterialKind::Video,
            PresentMaterialState::Pdf(_) => MaterialKind::Pdf,
        }
    }

    pub fn material_id(&self) -> Option<&str> {
        match self {
            PresentMaterialState::Video(state) => state.material.as_ref().map(|m| m.id.as_str()),
            PresentMaterialState::Pdf(state) => state.material.as_ref().map(|m| m.id.as_str()),
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            PresentMaterialState::Video(state) => state.updated_at,
            PresentMaterialState::Pdf(state) => state.updated_at,
        }
    }

    /// Whether `material` is the presented one: same kind and same ID.
    pub fn is_presenting(&self, material: &Material) -> bool {
        match (self, material) {
            (PresentMaterialState::Video(state), Material::Video(m)) => {
                state.material.as_ref().is_some_and(|p| p.id == m.id)
            }
            (PresentMaterialState::Pdf(state), Material::Pdf(m)) => {
                state.material.as_ref().is_some_and(|p| p.id == m.id)
            }
            (PresentMaterialState::Video(_), Material::Pdf(_))
            | (PresentMaterialState::Pdf(_), Material::Video(_)) => false,
        }
    }
}
