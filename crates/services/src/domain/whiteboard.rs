use super::error::{DomainError, DomainResult};

/// Zoom of the shared whiteboard, shared by every attendee of the room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiteboardZoomState {
    pub pdf_scale_ratio: f64,
    pub pdf_width: f64,
    pub pdf_height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for WhiteboardZoomState {
    fn default() -> Self {
        Self {
            pdf_scale_ratio: 100.0,
            pdf_width: 1920.0,
            pdf_height: 1080.0,
            center_x: 0.0,
            center_y: 0.0,
        }
    }
}

impl WhiteboardZoomState {
    pub fn is_valid(&self) -> DomainResult<()> {
        if !(self.pdf_scale_ratio > 0.0) {
            return Err(DomainError::invalid("pdf scale ratio must be positive"));
        }
        if !(self.pdf_width > 0.0) || !(self.pdf_height > 0.0) {
            return Err(DomainError::invalid("pdf width and height must be positive"));
        }
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(DomainError::invalid("whiteboard center must be a finite point"));
        }
        Ok(())
    }
}

impl From<classroom_db::models::WhiteboardZoomState> for WhiteboardZoomState {
    fn from(doc: classroom_db::models::WhiteboardZoomState) -> Self {
        Self {
            pdf_scale_ratio: doc.pdf_scale_ratio,
            pdf_width: doc.pdf_width,
            pdf_height: doc.pdf_height,
            center_x: doc.center_x,
            center_y: doc.center_y,
        }
    }
}

impl From<WhiteboardZoomState> for classroom_db::models::WhiteboardZoomState {
    fn from(state: WhiteboardZoomState) -> Self {
        Self {
            pdf_scale_ratio: state.pdf_scale_ratio,
            pdf_width: state.pdf_width,
            pdf_height: state.pdf_height,
            center_x: state.center_x,
            center_y: state.center_y,
        }
    }
}
