pub mod classroom;
pub mod dao;
pub mod domain;

pub use classroom::{ClassroomService, ServiceError, ServiceResult};
pub use dao::*;
