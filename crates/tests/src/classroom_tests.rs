use std::time::Duration;

use bson::DateTime;
use chrono::Utc;
use classroom_db::models::{AnnotationState, HandsUpState, MemberUserState, TeachingMedium, UserGroup};
use classroom_services::{LessonDao, ServiceError};
use classroom_services::domain::{
    AttendeeAnnotationState, AttendeeRaisingHandState, AttendeeState, CurrentPolling,
    CurrentPollingOption, CurrentPollingOptions, PlayerState, PresentMaterialState,
    VideoPresentMaterialState, VideoState, WhiteboardZoomState,
};
use tokio_test::assert_ok;

use crate::fixtures::seed::LessonSeed;
use crate::fixtures::test_db::TestDb;

fn joined() -> MemberUserState {
    let now = DateTime::now();
    MemberUserState {
        hands_up: Some(HandsUpState {
            value: false,
            updated_at: now,
        }),
        annotation: Some(AnnotationState {
            be_allowed: true,
            updated_at: now,
        }),
        polling_answer: None,
    }
}

fn attendee(user_id: &str) -> AttendeeState {
    let now = Utc::now();
    AttendeeState {
        user_id: user_id.to_string(),
        raising_hand_state: Some(AttendeeRaisingHandState {
            is_raising_hand: true,
            updated_at: now,
        }),
        annotation_state: Some(AttendeeAnnotationState {
            be_allowed: false,
            updated_at: now,
        }),
        polling_answer: None,
    }
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn seeded_classroom_is_valid() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    for learner in &lesson.learner_ids {
        test.set_user_state(&lesson.lesson_id, learner, &joined()).await;
    }

    let classroom = test
        .service()
        .validate_classroom(&lesson.lesson_id)
        .await
        .unwrap();

    let room = classroom.room.unwrap();
    assert_eq!(room.materials.len(), 2);
    assert_eq!(room.attendee_states.get_attendee_ids(), lesson.learner_ids);
    let virtual_lesson = classroom.lesson.unwrap();
    assert_eq!(virtual_lesson.teaching_medium, TeachingMedium::Online);
    assert_eq!(virtual_lesson.learners.len(), lesson.learner_ids.len() + 1);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn offline_lesson_is_invalid() {
    let test = TestDb::spawn().await;
    let lesson = test
        .seed_lesson(LessonSeed {
            medium: TeachingMedium::Offline,
            ..Default::default()
        })
        .await;

    let err = test
        .service()
        .validate_classroom(&lesson.lesson_id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("is not an online lesson"), "{err}");
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn classroom_without_streaming_room_is_invalid() {
    let test = TestDb::spawn().await;
    let lesson = test
        .seed_lesson(LessonSeed {
            room_id: None,
            ..Default::default()
        })
        .await;

    let err = test
        .service()
        .validate_classroom(&lesson.lesson_id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("streaming provider cannot be empty"), "{err}");
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn missing_lesson_is_not_found() {
    let test = TestDb::spawn().await;
    let err = test.service().get_classroom("nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn updated_room_is_persisted() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    let service = test.service();

    let mut room = service
        .get_classroom(&lesson.lesson_id)
        .await
        .unwrap()
        .room
        .unwrap();
    let video = room
        .materials
        .get_video_material_element(0)
        .cloned()
        .expect("seeded video comes first");
    room.present_material_state = Some(PresentMaterialState::Video(VideoPresentMaterialState {
        material: Some(video),
        updated_at: Utc::now(),
        video_state: Some(VideoState {
            current_time: Duration::from_millis(42_000),
            player_state: PlayerState::Pause,
        }),
    }));
    room.current_polling = Some(CurrentPolling::started(CurrentPollingOptions::new(vec![
        CurrentPollingOption::new("A", true),
        CurrentPollingOption::new("B", false),
    ])));
    room.whiteboard_zoom_state = Some(WhiteboardZoomState {
        pdf_scale_ratio: 150.0,
        ..Default::default()
    });
    room.attendee_states = vec![attendee(&lesson.learner_ids[0])].into();

    assert_ok!(service.update_room(&lesson.lesson_id, room).await);

    let reloaded = service
        .get_classroom(&lesson.lesson_id)
        .await
        .unwrap()
        .room
        .unwrap();
    match reloaded.present_material_state {
        Some(PresentMaterialState::Video(state)) => {
            assert_eq!(state.material.unwrap().id, lesson.video_id);
            assert_eq!(
                state.video_state.unwrap().current_time,
                Duration::from_millis(42_000)
            );
        }
        other => panic!("expected the video to be presented, got {other:?}"),
    }
    assert_eq!(reloaded.current_polling.unwrap().options.len(), 2);
    assert_eq!(reloaded.whiteboard_zoom_state.unwrap().pdf_scale_ratio, 150.0);
    assert_eq!(
        reloaded.attendee_states.get_attendee_ids(),
        vec![lesson.learner_ids[0].clone()]
    );
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn update_with_non_member_attendee_is_rejected() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    test.seed_user("visitor", UserGroup::Parent).await;
    let service = test.service();

    let mut room = service
        .get_classroom(&lesson.lesson_id)
        .await
        .unwrap()
        .room
        .unwrap();
    room.attendee_states = vec![attendee("visitor")].into();

    let err = service
        .update_room(&lesson.lesson_id, room)
        .await
        .unwrap_err();
    match err {
        ServiceError::Domain(e) => {
            assert!(!e.is_port_failure());
            assert!(e.to_string().contains("is not a member"), "{e}");
        }
        other => panic!("expected a domain error, got {other:?}"),
    }

    let reloaded = service.get_classroom(&lesson.lesson_id).await.unwrap();
    assert!(reloaded.room.unwrap().attendee_states.is_empty());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn ending_a_live_lesson_sets_end_time() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    let service = test.service();

    assert_ok!(service.end_live_lesson(&lesson.lesson_id).await);

    let classroom = service.get_classroom(&lesson.lesson_id).await.unwrap();
    assert!(classroom.room.unwrap().ended_at.is_some());
    assert!(classroom.lesson.unwrap().end_at.is_some());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn whiteboard_zoom_is_upserted_on_a_fresh_lesson() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    let zoom = classroom_db::models::WhiteboardZoomState {
        pdf_scale_ratio: 200.0,
        center_x: 12.5,
        ..Default::default()
    };

    assert_ok!(
        LessonDao::new(&test.db)
            .upsert_whiteboard_zoom_state(&lesson.lesson_id, &zoom)
            .await
    );

    let room = test
        .service()
        .get_classroom(&lesson.lesson_id)
        .await
        .unwrap()
        .room
        .unwrap();
    let stored = room.whiteboard_zoom_state.unwrap();
    assert_eq!(stored.pdf_scale_ratio, 200.0);
    assert_eq!(stored.center_x, 12.5);
    assert_eq!(stored.pdf_width, 1920.0);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn attendees_left_out_of_the_room_are_cleared() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    for learner in &lesson.learner_ids {
        test.set_user_state(&lesson.lesson_id, learner, &joined()).await;
    }
    let service = test.service();

    let mut room = service
        .get_classroom(&lesson.lesson_id)
        .await
        .unwrap()
        .room
        .unwrap();
    assert_eq!(room.attendee_states.len(), 2);
    room.attendee_states = vec![attendee(&lesson.learner_ids[0])].into();

    assert_ok!(service.update_room(&lesson.lesson_id, room).await);

    let reloaded = service
        .get_classroom(&lesson.lesson_id)
        .await
        .unwrap()
        .room
        .unwrap();
    assert_eq!(
        reloaded.attendee_states.get_attendee_ids(),
        vec![lesson.learner_ids[0].clone()]
    );
}
