pub mod base;
pub mod classroom;
pub mod lesson;
pub mod lesson_member;
pub mod media;
pub mod streaming;
pub mod user;

pub use base::{BaseDao, DaoError, DaoResult};
pub use classroom::ClassroomDao;
pub use lesson::LessonDao;
pub use lesson_member::LessonMemberDao;
pub use media::MediaDao;
pub use streaming::LessonStreamingProvider;
pub use user::UserDao;
