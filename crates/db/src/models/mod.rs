pub mod lesson;
pub mod lesson_member;
pub mod media;
pub mod room_state;
pub mod user;

pub use lesson::*;
pub use lesson_member::*;
pub use media::*;
pub use room_state::*;
pub use user::*;
