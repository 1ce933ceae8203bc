//! In-memory repository implementations for service tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use chat_common::JwtService;
use chat_core::entities::{
    Chat, ChatMember, ChatType, DeliveryStatus, Message, MessageStatus, User,
};
use chat_core::traits::{
    ChatRepository, MemberRepository, MemberWithUser, MessageRepository, RepoResult,
    UserRepository,
};
use chat_core::{DomainError, Snowflake, SnowflakeGenerator};
use chat_service::{ServiceContext, ServiceContextBuilder};

pub const TEST_SECRET: &str = "service-test-secret-that-is-long-enough";

#[derive(Default)]
struct State {
    users: BTreeMap<Snowflake, (User, String)>,
    chats: BTreeMap<Snowflake, Chat>,
    members: Vec<ChatMember>,
    messages: Vec<Message>,
    statuses: BTreeMap<(Snowflake, Snowflake), MessageStatus>,
}

/// One shared store backing all four repository ports
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    /// Number of repository calls, to check validation happens first
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn chat_count(&self) -> usize {
        self.state.lock().chats.len()
    }

    pub fn message_count(&self) -> usize {
        self.state.lock().messages.len()
    }

    pub fn members_of(&self, chat_id: Snowflake) -> Vec<ChatMember> {
        self.state
            .lock()
            .members
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect()
    }

    pub fn statuses_of(&self, message_id: Snowflake) -> Vec<MessageStatus> {
        self.state
            .lock()
            .statuses
            .values()
            .filter(|s| s.message_id == message_id)
            .cloned()
            .collect()
    }

    pub fn chat(&self, chat_id: Snowflake) -> Option<Chat> {
        self.state.lock().chats.get(&chat_id).cloned()
    }

    /// Simulate a reader marking a message as read
    pub fn mark_read(&self, message_id: Snowflake, user_id: Snowflake) {
        self.state.lock().statuses.insert(
            (message_id, user_id),
            MessageStatus::new(message_id, user_id, DeliveryStatus::Read),
        );
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl State {
    fn is_member(&self, chat_id: Snowflake, user_id: Snowflake) -> bool {
        self.members
            .iter()
            .any(|m| m.chat_id == chat_id && m.user_id == user_id)
    }

    fn find_direct(&self, a: Snowflake, b: Snowflake) -> Option<Chat> {
        self.chats
            .values()
            .filter(|c| c.chat_type == ChatType::Direct)
            .find(|c| self.is_member(c.id, a) && self.is_member(c.id, b))
            .cloned()
    }

    fn members_with_users(&self, chat_ids: &[Snowflake]) -> Vec<MemberWithUser> {
        self.members
            .iter()
            .filter(|m| chat_ids.contains(&m.chat_id))
            .filter_map(|m| {
                self.users.get(&m.user_id).map(|(u, _)| MemberWithUser {
                    member: m.clone(),
                    user: u.clone(),
                })
            })
            .collect()
    }

    fn insert_with_members(&mut self, chat: &Chat, members: &[ChatMember]) -> RepoResult<()> {
        if members.iter().any(|m| !self.users.contains_key(&m.user_id)) {
            return Err(DomainError::UsersNotFound);
        }
        self.chats.insert(chat.id, chat.clone());
        self.members.extend_from_slice(members);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        self.tick();
        Ok(self.state.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        self.tick();
        let state = self.state.lock();
        Ok(state
            .users
            .values()
            .filter(|(u, _)| ids.contains(&u.id))
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.tick();
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        self.tick();
        Ok(self.state.lock().users.values().any(|(u, _)| u.email == email))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.tick();
        let mut state = self.state.lock();
        if state.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        self.tick();
        Ok(self.state.lock().users.get(&id).map(|(_, h)| h.clone()))
    }
}

#[async_trait]
impl ChatRepository for InMemoryStore {
    async fn find_direct(&self, user_a: Snowflake, user_b: Snowflake) -> RepoResult<Option<Chat>> {
        self.tick();
        Ok(self.state.lock().find_direct(user_a, user_b))
    }

    async fn create_direct(
        &self,
        chat: &Chat,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> RepoResult<(Chat, bool)> {
        self.tick();
        // the lock plays the role of the store's pair lock
        let mut state = self.state.lock();
        if let Some(existing) = state.find_direct(user_a, user_b) {
            return Ok((existing, false));
        }
        let members = [
            ChatMember {
                chat_id: chat.id,
                user_id: user_a,
                role: Default::default(),
                joined_at: chat.created_at,
            },
            ChatMember {
                chat_id: chat.id,
                user_id: user_b,
                role: Default::default(),
                joined_at: chat.created_at,
            },
        ];
        state.insert_with_members(chat, &members)?;
        Ok((chat.clone(), true))
    }

    async fn create_with_members(&self, chat: &Chat, members: &[ChatMember]) -> RepoResult<()> {
        self.tick();
        self.state.lock().insert_with_members(chat, members)
    }

    async fn find_by_member(&self, user_id: Snowflake) -> RepoResult<Vec<Chat>> {
        self.tick();
        let state = self.state.lock();
        let mut chats: Vec<Chat> = state
            .chats
            .values()
            .filter(|c| state.is_member(c.id, user_id))
            .cloned()
            .collect();
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(chats)
    }

    async fn members_with_users(&self, chat_id: Snowflake) -> RepoResult<Vec<MemberWithUser>> {
        self.tick();
        Ok(self.state.lock().members_with_users(&[chat_id]))
    }

    async fn members_with_users_in(
        &self,
        chat_ids: &[Snowflake],
    ) -> RepoResult<Vec<MemberWithUser>> {
        self.tick();
        Ok(self.state.lock().members_with_users(chat_ids))
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn is_member(&self, chat_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        self.tick();
        Ok(self.state.lock().is_member(chat_id, user_id))
    }

}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn send(&self, message: &Message) -> RepoResult<Vec<MessageStatus>> {
        self.tick();
        let mut state = self.state.lock();
        let Some(chat) = state.chats.get_mut(&message.chat_id) else {
            return Err(DomainError::ChatNotFound(message.chat_id));
        };
        chat.touch(message.created_at);

        let member_ids: Vec<Snowflake> = state
            .members
            .iter()
            .filter(|m| m.chat_id == message.chat_id)
            .map(|m| m.user_id)
            .collect();
        let statuses = MessageStatus::fan_out(message, &member_ids);

        state.messages.push(message.clone());
        for status in &statuses {
            state
                .statuses
                .insert((status.message_id, status.user_id), status.clone());
        }
        Ok(statuses)
    }

    async fn find_by_chat(&self, chat_id: Snowflake) -> RepoResult<Vec<Message>> {
        self.tick();
        let state = self.state.lock();
        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(messages)
    }

    async fn find_latest_in(&self, chat_ids: &[Snowflake]) -> RepoResult<Vec<Message>> {
        self.tick();
        let state = self.state.lock();
        let mut latest: BTreeMap<Snowflake, &Message> = BTreeMap::new();
        for message in state.messages.iter().filter(|m| chat_ids.contains(&m.chat_id)) {
            let newer = latest.get(&message.chat_id).map_or(true, |current| {
                (message.created_at, message.id) > (current.created_at, current.id)
            });
            if newer {
                latest.insert(message.chat_id, message);
            }
        }
        Ok(latest.into_values().cloned().collect())
    }

    async fn count_unread_in(
        &self,
        chat_ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        self.tick();
        let state = self.state.lock();
        let mut counts: BTreeMap<Snowflake, i64> = BTreeMap::new();
        for message in state.messages.iter().filter(|m| chat_ids.contains(&m.chat_id)) {
            let read = state
                .statuses
                .get(&(message.id, user_id))
                .is_some_and(|s| s.status == DeliveryStatus::Read);
            if !read {
                *counts.entry(message.chat_id).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }

    async fn find_statuses(
        &self,
        message_ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<MessageStatus>> {
        self.tick();
        let state = self.state.lock();
        Ok(message_ids
            .iter()
            .filter_map(|&id| state.statuses.get(&(id, user_id)).cloned())
            .collect())
    }
}

/// Service context wired to a fresh in-memory store
pub fn test_context() -> (ServiceContext, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let ctx = ServiceContextBuilder::new()
        .user_repo(store.clone())
        .chat_repo(store.clone())
        .member_repo(store.clone())
        .message_repo(store.clone())
        .jwt_service(Arc::new(JwtService::new(TEST_SECRET, 3600)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .expect("all dependencies provided");
    (ctx, store)
}

/// Insert a user directly into the store
pub async fn seed_user(store: &InMemoryStore, username: &str) -> User {
    static GENERATOR: std::sync::OnceLock<SnowflakeGenerator> = std::sync::OnceLock::new();
    let id = GENERATOR.get_or_init(|| SnowflakeGenerator::new(2)).generate();
    let user = User::new(id, format!("{username}@example.com"), username.to_string());
    UserRepository::create(store, &user, "unused-hash")
        .await
        .expect("seed user");
    user
}
