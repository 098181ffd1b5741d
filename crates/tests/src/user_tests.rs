use classroom_db::models::UserGroup;
use classroom_services::domain::{UserModulePort, VirtualLessonPort};
use classroom_services::{DaoError, LessonDao, LessonMemberDao, UserDao};

use crate::fixtures::seed::LessonSeed;
use crate::fixtures::test_db::TestDb;

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn user_port_answers_for_every_requested_id() {
    let test = TestDb::spawn().await;
    test.seed_user("user-1", UserGroup::Student).await;
    test.seed_user("user-2", UserGroup::Teacher).await;
    let users = UserDao::new(&test.db);

    let requested = ids(&["user-1", "user-2", "user-3"]);
    let presence = users.check_existed_user_ids(&requested).await.unwrap();

    assert!(presence.is_present("user-1"));
    assert!(presence.is_present("user-2"));
    assert!(!presence.is_present("user-3"));
    assert_eq!(presence.missing(&requested), vec!["user-3"]);

    let empty = users.check_existed_user_ids(&[]).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn duplicate_user_is_rejected() {
    let test = TestDb::spawn().await;
    test.seed_user("user-1", UserGroup::Student).await;

    let err = UserDao::new(&test.db)
        .create(
            "user-1".to_string(),
            "Again".to_string(),
            "again@example.com".to_string(),
            UserGroup::Student,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DaoError::DuplicateKey(_)));
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn lesson_port_checks_medium_and_membership() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;
    let lessons = LessonDao::new(&test.db);
    let port: &dyn VirtualLessonPort = &lessons;

    assert!(port.is_lesson_medium_online(&lesson.lesson_id).await.unwrap());
    assert!(!port.is_lesson_medium_online("missing-lesson").await.unwrap());

    let requested = vec![lesson.learner_ids[0].clone(), "stranger".to_string()];
    let presence = port
        .check_lesson_member_ids(&lesson.lesson_id, &requested)
        .await
        .unwrap();
    assert_eq!(presence.missing(&requested), vec!["stranger"]);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn member_is_unique_per_lesson_across_courses() {
    let test = TestDb::spawn().await;
    let lesson = test.seed_lesson(LessonSeed::default()).await;

    let err = LessonMemberDao::new(&test.db)
        .create(&lesson.lesson_id, &lesson.learner_ids[0], "another-course")
        .await
        .unwrap_err();
    assert!(matches!(err, DaoError::DuplicateKey(_)));
}
