//! Virtual classroom aggregate and the ports it validates against.

pub mod attendee;
pub mod error;
pub mod material;
pub mod polling;
pub mod ports;
pub mod present_material;
pub mod recording;
pub mod streaming_provider;
pub mod virtual_classroom;
pub mod virtual_lesson;
pub mod virtual_room;
pub mod whiteboard;

#[cfg(test)]
pub(crate) mod mock;

pub use attendee::{
    AttendeeAnnotationState, AttendeePollingAnswerState, AttendeeRaisingHandState, AttendeeState,
    AttendeeStates,
};
pub use error::{DomainError, DomainResult, PortError, PortResult, ResultExt};
pub use material::{Material, MaterialKind, Materials, PdfMaterial, VideoMaterial};
pub use polling::{CurrentPolling, CurrentPollingOption, CurrentPollingOptions, CurrentPollingStatus};
pub use ports::{ClassroomPorts, Presence, StreamingProviderPort, UserModulePort, VirtualLessonPort};
pub use present_material::{
    PdfPresentMaterialState, PlayerState, PresentMaterialState, VideoPresentMaterialState,
    VideoState,
};
pub use recording::RecordingState;
pub use streaming_provider::StreamingProvider;
pub use virtual_classroom::{VirtualClassroom, VirtualClassroomBuilder};
pub use virtual_lesson::{LessonLearner, VirtualLesson, VirtualLessonBuilder};
pub use virtual_room::{VirtualRoom, VirtualRoomBuilder};
pub use whiteboard::WhiteboardZoomState;
