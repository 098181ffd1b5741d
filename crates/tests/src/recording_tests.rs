use classroom_services::{DaoError, ServiceError};
use classroom_services::domain::RecordingState;
use tokio_test::{assert_err, assert_ok};

use crate::fixtures::seed::LessonSeed;
use crate::fixtures::test_db::TestDb;

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn recording_is_granted_once() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    let service = test.service();

    assert_ok!(service.start_recording(&lesson.lesson_id, &lesson.teacher_id).await);

    let err = service
        .start_recording(&lesson.lesson_id, &lesson.learner_ids[0])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Dao(DaoError::NoRowsUpdated(_))));

    let classroom = service.get_classroom(&lesson.lesson_id).await.unwrap();
    assert_eq!(
        classroom.room.unwrap().recording_state,
        Some(RecordingState::started_by(lesson.teacher_id.clone()))
    );
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn only_the_creator_stops_a_recording() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    let service = test.service();

    assert_ok!(service.start_recording(&lesson.lesson_id, &lesson.teacher_id).await);

    let err = service
        .stop_recording(&lesson.lesson_id, &lesson.learner_ids[0])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Dao(DaoError::NoRowsUpdated(_))));

    assert_ok!(service.stop_recording(&lesson.lesson_id, &lesson.teacher_id).await);
    let err = service
        .stop_recording(&lesson.lesson_id, &lesson.teacher_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Dao(DaoError::NoRowsUpdated(_))));

    let classroom = service.get_classroom(&lesson.lesson_id).await.unwrap();
    assert_eq!(
        classroom.room.unwrap().recording_state,
        Some(RecordingState::stopped())
    );

    // A stopped recording can be started by someone else.
    assert_ok!(service.start_recording(&lesson.lesson_id, &lesson.learner_ids[0]).await);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn unknown_creator_is_rejected_before_writing() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    let service = test.service();

    let err = service
        .start_recording(&lesson.lesson_id, "ghost")
        .await
        .unwrap_err();
    match err {
        ServiceError::Domain(e) => assert!(e.to_string().contains("is not exist")),
        other => panic!("expected a domain error, got {other:?}"),
    }

    let classroom = service.get_classroom(&lesson.lesson_id).await.unwrap();
    assert!(classroom.room.unwrap().recording_state.is_none());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn stopping_a_lesson_that_is_not_recording_fails() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    let service = test.service();

    assert_err!(service.stop_recording(&lesson.lesson_id, &lesson.teacher_id).await);

    let classroom = service.get_classroom(&lesson.lesson_id).await.unwrap();
    assert!(classroom.room.unwrap().recording_state.is_none());
}
