//! Hydrates the classroom aggregate from lesson documents and writes the
//! live room back as the lesson's `room_state`.

use std::time::Duration;

use bson::DateTime as BsonDateTime;
use chrono::{DateTime, Utc};
use classroom_db::models::{
    self as db, Lesson, LessonMember, LessonRoomState, Media, MediaType, MemberUserState,
};
use mongodb::Database;
use tracing::debug;

use super::base::DaoResult;
use super::lesson::LessonDao;
use super::lesson_member::LessonMemberDao;
use super::media::MediaDao;
use crate::domain::{
    AttendeeAnnotationState, AttendeePollingAnswerState, AttendeeRaisingHandState, AttendeeState,
    CurrentPolling, CurrentPollingOption, LessonLearner, Material, Materials, PdfMaterial,
    PdfPresentMaterialState, PresentMaterialState, RecordingState, StreamingProvider,
    VideoMaterial, VideoPresentMaterialState, VideoState, VirtualClassroom,
    VirtualClassroomBuilder, VirtualLesson, VirtualLessonBuilder, VirtualRoom, VirtualRoomBuilder,
};

pub struct ClassroomDao {
    pub lessons: LessonDao,
    pub members: LessonMemberDao,
    pub media: MediaDao,
    default_total_slots: u32,
}

impl ClassroomDao {
    pub fn new(db: &Database, default_total_slots: u32) -> Self {
        Self {
            lessons: LessonDao::new(db),
            members: LessonMemberDao::new(db),
            media: MediaDao::new(db),
            default_total_slots,
        }
    }

    /// Unvalidated classroom for `lesson_id`.
    pub async fn find_classroom(&self, lesson_id: &str) -> DaoResult<VirtualClassroom> {
        let lesson = self.lessons.find_by_id(lesson_id).await?;
        let members = self.members.find_by_lesson(lesson_id).await?;
        let media = self.media.find_by_ids(&lesson.media_ids).await?;
        debug!(
            lesson_id,
            members = members.len(),
            media = media.len(),
            "Hydrating classroom"
        );
        Ok(to_virtual_classroom(&lesson, &members, &media, self.default_total_slots))
    }

    /// Persists the live parts of `room` onto the lesson and its members.
    pub async fn save_room_state(&self, lesson_id: &str, room: &VirtualRoom) -> DaoResult<()> {
        self.lessons
            .update_room_state(lesson_id, &to_room_state(room))
            .await?;
        for attendee in room.attendee_states.iter() {
            self.members
                .update_user_state(lesson_id, &attendee.user_id, &to_member_user_state(attendee))
                .await?;
        }
        self.members
            .clear_user_states_except(lesson_id, &room.attendee_states.get_attendee_ids())
            .await?;
        Ok(())
    }
}

pub fn to_virtual_classroom(
    lesson: &Lesson,
    members: &[LessonMember],
    media: &[Media],
    default_total_slots: u32,
) -> VirtualClassroom {
    VirtualClassroomBuilder::new()
        .with_id(lesson.id.clone())
        .with_room(to_virtual_room(lesson, members, media, default_total_slots))
        .with_lesson(to_virtual_lesson(lesson, members))
        .with_modification_time(lesson.created_at.to_chrono(), lesson.updated_at.to_chrono())
        .build_draft()
}

pub fn to_virtual_lesson(lesson: &Lesson, members: &[LessonMember]) -> VirtualLesson {
    let learners = members
        .iter()
        .map(|m| LessonLearner {
            learner_id: m.user_id.clone(),
            course_id: m.course_id.clone(),
            attend_status: m.attendance_status,
            location_id: m.location_id.clone(),
        })
        .collect();

    VirtualLessonBuilder::new()
        .with_lesson_id(lesson.id.clone())
        .with_name(lesson.name.clone())
        .with_center_id(lesson.center_id.clone())
        .with_course_id(lesson.course_id.clone())
        .with_class_id(lesson.class_id.clone())
        .with_scheduler_id(lesson.scheduler_id.clone())
        .with_modification_time(lesson.created_at.to_chrono(), lesson.updated_at.to_chrono())
        .with_time(lesson.start_time.to_chrono(), lesson.end_time.to_chrono())
        .with_scheduling_status(lesson.scheduling_status)
        .with_teaching_medium(lesson.teaching_medium)
        .with_teaching_method(lesson.teaching_method)
        .with_learners(learners)
        .with_teacher_ids(lesson.teacher_ids.clone())
        .with_room_id(lesson.room_id.clone())
        .with_end_at(lesson.end_at.map(|t| t.to_chrono()))
        .build_draft()
}

pub fn to_virtual_room(
    lesson: &Lesson,
    members: &[LessonMember],
    media: &[Media],
    default_total_slots: u32,
) -> VirtualRoom {
    let streaming_provider = lesson.room_id.as_ref().map(|room_id| {
        StreamingProvider::new(
            room_id.clone(),
            lesson.total_streaming_slots.unwrap_or(default_total_slots),
        )
    });
    let materials: Materials = media.iter().map(to_material).collect();
    let room_state = lesson.room_state.clone().unwrap_or_default();

    let present_material_state = room_state
        .current_material
        .as_ref()
        .map(|current| to_present_material_state(current, &materials));

    let attendee_states = members
        .iter()
        .filter_map(|m| {
            m.user_state
                .as_ref()
                .map(|state| to_attendee_state(&m.user_id, state))
        })
        .collect::<Vec<_>>();

    VirtualRoomBuilder::new()
        .with_id(lesson.id.clone())
        .with_streaming_provider(streaming_provider)
        .with_materials(materials)
        .with_present_material_state(present_material_state)
        .with_current_polling(room_state.current_polling.map(to_current_polling))
        .with_recording_state(room_state.recording.map(|r| RecordingState {
            is_recording: r.is_recording,
            creator: r.creator,
        }))
        .with_attendee_states(attendee_states)
        .with_whiteboard_zoom_state(room_state.whiteboard_zoom_state.map(Into::into))
        .with_ended_at(lesson.end_at.map(|t| t.to_chrono()))
        .build_draft()
}

pub fn to_room_state(room: &VirtualRoom) -> LessonRoomState {
    LessonRoomState {
        current_material: room.present_material_state.as_ref().and_then(to_current_material),
        current_polling: room.current_polling.as_ref().map(to_polling_document),
        recording: room.recording_state.as_ref().map(|r| db::RecordingState {
            is_recording: r.is_recording,
            creator: r.creator.clone(),
        }),
        whiteboard_zoom_state: room.whiteboard_zoom_state.map(Into::into),
    }
}

pub fn to_member_user_state(state: &AttendeeState) -> MemberUserState {
    MemberUserState {
        hands_up: state.raising_hand_state.as_ref().map(|h| db::HandsUpState {
            value: h.is_raising_hand,
            updated_at: BsonDateTime::from_chrono(h.updated_at),
        }),
        annotation: state.annotation_state.as_ref().map(|a| db::AnnotationState {
            be_allowed: a.be_allowed,
            updated_at: BsonDateTime::from_chrono(a.updated_at),
        }),
        polling_answer: state.polling_answer.as_ref().map(|p| db::PollingAnswerState {
            string_array_value: p.answer.clone(),
            updated_at: BsonDateTime::from_chrono(p.updated_at),
        }),
    }
}

fn to_material(media: &Media) -> Material {
    match media.media_type {
        MediaType::Video => Material::Video(VideoMaterial {
            id: media.id.clone(),
            name: media.name.clone(),
            video_id: media.resource.clone(),
        }),
        MediaType::Pdf => Material::Pdf(PdfMaterial {
            id: media.id.clone(),
            name: media.name.clone(),
            url: media.resource.clone(),
            converted_image: media.converted_image.clone(),
        }),
    }
}

fn to_present_material_state(
    current: &db::CurrentMaterial,
    materials: &Materials,
) -> PresentMaterialState {
    let updated_at = current.updated_at.to_chrono();
    let material = current
        .data
        .as_ref()
        .map(to_material)
        .or_else(|| materials.iter().find(|m| m.id() == current.media_id).cloned());
    let video_state = current.video_state.as_ref().map(|v| VideoState {
        current_time: Duration::from_millis(u64::try_from(v.current_time_ms).unwrap_or(0)),
        player_state: v.player_state,
    });

    match material {
        Some(Material::Video(video)) => PresentMaterialState::Video(VideoPresentMaterialState {
            material: Some(video),
            updated_at,
            video_state,
        }),
        Some(Material::Pdf(pdf)) => PresentMaterialState::Pdf(PdfPresentMaterialState {
            material: Some(pdf),
            updated_at,
        }),
        // Unknown media; validation rejects the empty material.
        None if video_state.is_some() => {
            PresentMaterialState::Video(VideoPresentMaterialState {
                material: None,
                updated_at,
                video_state,
            })
        }
        None => PresentMaterialState::Pdf(PdfPresentMaterialState {
            material: None,
            updated_at,
        }),
    }
}

fn to_current_material(state: &PresentMaterialState) -> Option<db::CurrentMaterial> {
    let media_id = state.material_id()?.to_string();
    let video_state = match state {
        PresentMaterialState::Video(video) => video.video_state.as_ref().map(|v| db::VideoState {
            current_time_ms: i64::try_from(v.current_time.as_millis()).unwrap_or(i64::MAX),
            player_state: v.player_state,
        }),
        PresentMaterialState::Pdf(_) => None,
    };
    Some(db::CurrentMaterial {
        media_id,
        data: None,
        video_state,
        updated_at: BsonDateTime::from_chrono(state.updated_at()),
    })
}

fn to_current_polling(polling: db::CurrentPolling) -> CurrentPolling {
    CurrentPolling {
        options: polling
            .options
            .into_iter()
            .map(|o| CurrentPollingOption {
                answer: o.answer,
                is_correct: o.is_correct,
                content: o.content,
            })
            .collect(),
        status: polling.status,
        question: polling.question,
        is_shared_result: polling.is_shared_result,
        created_at: polling.created_at.to_chrono(),
        updated_at: polling.updated_at.to_chrono(),
        stopped_at: polling.stopped_at.map(|t| t.to_chrono()),
        ended_at: polling.ended_at.map(|t| t.to_chrono()),
    }
}

fn to_polling_document(polling: &CurrentPolling) -> db::CurrentPolling {
    let to_bson = |t: DateTime<Utc>| BsonDateTime::from_chrono(t);
    db::CurrentPolling {
        options: polling
            .options
            .iter()
            .map(|o| db::PollingOption {
                answer: o.answer.clone(),
                is_correct: o.is_correct,
                content: o.content.clone(),
            })
            .collect(),
        status: polling.status,
        question: polling.question.clone(),
        is_shared_result: polling.is_shared_result,
        created_at: to_bson(polling.created_at),
        updated_at: to_bson(polling.updated_at),
        stopped_at: polling.stopped_at.map(to_bson),
        ended_at: polling.ended_at.map(to_bson),
    }
}

fn to_attendee_state(user_id: &str, state: &MemberUserState) -> AttendeeState {
    AttendeeState {
        user_id: user_id.to_string(),
        raising_hand_state: state.hands_up.as_ref().map(|h| AttendeeRaisingHandState {
            is_raising_hand: h.value,
            updated_at: h.updated_at.to_chrono(),
        }),
        annotation_state: state.annotation.as_ref().map(|a| AttendeeAnnotationState {
            be_allowed: a.be_allowed,
            updated_at: a.updated_at.to_chrono(),
        }),
        polling_answer: state
            .polling_answer
            .as_ref()
            .map(|p| AttendeePollingAnswerState {
                answer: p.string_array_value.clone(),
                updated_at: p.updated_at.to_chrono(),
            }),
    }
}
