//! Scripted port doubles for domain tests.
//!
//! Each expected call is queued as a closure; a call with nothing queued
//! panics, and `assert_all_called` fails when queued calls were never made.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use super::error::{PortError, PortResult};
use super::ports::{Presence, StreamingProviderPort, UserModulePort, VirtualLessonPort};
use super::virtual_room::VirtualRoom;

type CheckIdsFn = Box<dyn Fn(&[String]) -> PortResult<Presence> + Send + Sync>;
type CheckMembersFn = Box<dyn Fn(&str, &[String]) -> PortResult<Presence> + Send + Sync>;
type MediumFn = Box<dyn Fn(&str) -> PortResult<bool> + Send + Sync>;
type SlotFn = Box<dyn Fn(&VirtualRoom, &str) -> PortResult<()> + Send + Sync>;

/// Every requested ID reported present.
pub fn all_present(ids: &[String]) -> PortResult<Presence> {
    Ok(Presence::from_found(ids, ids.iter().cloned()))
}

/// Every requested ID reported absent.
pub fn none_present(ids: &[String]) -> PortResult<Presence> {
    Ok(Presence::from_found(ids, std::iter::empty::<String>()))
}

pub fn port_down<T>() -> PortResult<T> {
    Err(PortError::msg("port unavailable"))
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Default)]
pub struct UserModulePortMock {
    check_existed_user_ids: Mutex<VecDeque<CheckIdsFn>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl UserModulePortMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_check_existed_user_ids<F>(self, f: F) -> Self
    where
        F: Fn(&[String]) -> PortResult<Presence> + Send + Sync + 'static,
    {
        self.check_existed_user_ids.lock().push_back(Box::new(f));
        self
    }

    /// Arguments of every call made so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    pub fn assert_all_called(&self) {
        let pending = self.check_existed_user_ids.lock().len();
        assert_eq!(pending, 0, "{pending} expected check_existed_user_ids call(s) not made");
    }
}

#[async_trait]
impl UserModulePort for UserModulePortMock {
    async fn check_existed_user_ids(&self, user_ids: &[String]) -> PortResult<Presence> {
        self.calls.lock().push(user_ids.to_vec());
        let f = self
            .check_existed_user_ids
            .lock()
            .pop_front()
            .expect("unexpected call to check_existed_user_ids");
        f(user_ids)
    }
}

#[derive(Default)]
pub struct VirtualLessonPortMock {
    is_lesson_medium_online: Mutex<VecDeque<MediumFn>>,
    check_lesson_member_ids: Mutex<VecDeque<CheckMembersFn>>,
}

impl VirtualLessonPortMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_is_lesson_medium_online<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> PortResult<bool> + Send + Sync + 'static,
    {
        self.is_lesson_medium_online.lock().push_back(Box::new(f));
        self
    }

    pub fn expect_check_lesson_member_ids<F>(self, f: F) -> Self
    where
        F: Fn(&str, &[String]) -> PortResult<Presence> + Send + Sync + 'static,
    {
        self.check_lesson_member_ids.lock().push_back(Box::new(f));
        self
    }

    pub fn assert_all_called(&self) {
        let medium = self.is_lesson_medium_online.lock().len();
        let members = self.check_lesson_member_ids.lock().len();
        assert_eq!(medium, 0, "{medium} expected is_lesson_medium_online call(s) not made");
        assert_eq!(members, 0, "{members} expected check_lesson_member_ids call(s) not made");
    }
}

#[async_trait]
impl VirtualLessonPort for VirtualLessonPortMock {
    async fn is_lesson_medium_online(&self, lesson_id: &str) -> PortResult<bool> {
        let f = self
            .is_lesson_medium_online
            .lock()
            .pop_front()
            .expect("unexpected call to is_lesson_medium_online");
        f(lesson_id)
    }

    async fn check_lesson_member_ids(
        &self,
        lesson_id: &str,
        user_ids: &[String],
    ) -> PortResult<Presence> {
        let f = self
            .check_lesson_member_ids
            .lock()
            .pop_front()
            .expect("unexpected call to check_lesson_member_ids");
        f(lesson_id, user_ids)
    }
}

#[derive(Default)]
pub struct StreamingProviderPortMock {
    consume: Mutex<VecDeque<SlotFn>>,
    release: Mutex<VecDeque<SlotFn>>,
    consumed_by: Mutex<Vec<String>>,
    released_by: Mutex<Vec<String>>,
}

impl StreamingProviderPortMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_consume<F>(self, f: F) -> Self
    where
        F: Fn(&VirtualRoom, &str) -> PortResult<()> + Send + Sync + 'static,
    {
        self.consume.lock().push_back(Box::new(f));
        self
    }

    pub fn expect_release<F>(self, f: F) -> Self
    where
        F: Fn(&VirtualRoom, &str) -> PortResult<()> + Send + Sync + 'static,
    {
        self.release.lock().push_back(Box::new(f));
        self
    }

    pub fn consume_calls(&self) -> usize {
        self.consumed_by.lock().len()
    }

    pub fn release_calls(&self) -> usize {
        self.released_by.lock().len()
    }

    pub fn assert_all_called(&self) {
        let consume = self.consume.lock().len();
        let release = self.release.lock().len();
        assert_eq!(consume, 0, "{consume} expected consume call(s) not made");
        assert_eq!(release, 0, "{release} expected release call(s) not made");
    }
}

#[async_trait]
impl StreamingProviderPort for StreamingProviderPortMock {
    async fn create_streaming_room(&self, room: &VirtualRoom) -> PortResult<String> {
        Ok(format!("streaming-{}", room.id))
    }

    async fn attendee_consume_a_streaming_slot(
        &self,
        room: &VirtualRoom,
        attendee_id: &str,
    ) -> PortResult<()> {
        self.consumed_by.lock().push(attendee_id.to_string());
        let f = self
            .consume
            .lock()
            .pop_front()
            .expect("unexpected call to attendee_consume_a_streaming_slot");
        f(room, attendee_id)
    }

    async fn attendee_release_a_streaming_slot(
        &self,
        room: &VirtualRoom,
        attendee_id: &str,
    ) -> PortResult<()> {
        self.released_by.lock().push(attendee_id.to_string());
        let f = self
            .release
            .lock()
            .pop_front()
            .expect("unexpected call to attendee_release_a_streaming_slot");
        f(room, attendee_id)
    }
}
