//! Chat service
//!
//! Direct-chat resolution, group creation and the per-user chat list.

use std::collections::{HashMap, HashSet};

use chat_core::entities::{Chat, ChatMember, MemberRole, User};
use chat_core::traits::MemberWithUser;
use chat_core::{DomainError, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{
    ChatResponse, ChatSummaryResponse, ChatWithMembers, CreateGroupChatRequest,
    DirectChatResponse, LastMessage, LastMessageResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Return the direct chat between the two users, creating it if needed
    #[instrument(skip(self))]
    pub async fn get_or_create_direct_chat(
        &self,
        requester_id: Snowflake,
        other_user_id: Option<Snowflake>,
    ) -> ServiceResult<DirectChatResponse> {
        let other_user_id =
            other_user_id.ok_or_else(|| ServiceError::validation("otherUserId is required"))?;

        if other_user_id == requester_id {
            return Err(DomainError::SelfChatNotAllowed.into());
        }

        if let Some(existing) = self
            .ctx
            .chat_repo()
            .find_direct(requester_id, other_user_id)
            .await?
        {
            debug!(chat_id = %existing.id, "Direct chat already exists");
            return Ok(DirectChatResponse {
                chat: self.with_members(existing).await?,
                created: false,
            });
        }

        if self.ctx.user_repo().find_by_id(other_user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(other_user_id).into());
        }

        let candidate = Chat::new_direct(self.ctx.generate_id(), requester_id);
        let (chat, created) = self
            .ctx
            .chat_repo()
            .create_direct(&candidate, requester_id, other_user_id)
            .await?;

        if created {
            info!(chat_id = %chat.id, other_user_id = %other_user_id, "Direct chat created");
        }

        Ok(DirectChatResponse {
            chat: self.with_members(chat).await?,
            created,
        })
    }

    /// Create a group chat owned by the requester
    ///
    /// `member_ids` is deduplicated and the requester's own id dropped; the
    /// requester always joins as ADMIN.
    #[instrument(skip(self, request), fields(members = request.member_ids.len()))]
    pub async fn create_group_chat(
        &self,
        requester_id: Snowflake,
        request: CreateGroupChatRequest,
    ) -> ServiceResult<ChatResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Group name is required"));
        }

        let member_ids = normalize_member_ids(requester_id, &request.member_ids);
        if member_ids.is_empty() {
            return Err(ServiceError::validation(
                "At least one other member is required",
            ));
        }

        let mut lookup = member_ids.clone();
        lookup.push(requester_id);
        let found = self.ctx.user_repo().find_by_ids(&lookup).await?;
        if found.len() != lookup.len() {
            return Err(DomainError::UsersNotFound.into());
        }

        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let chat = Chat::new_group(
            self.ctx.generate_id(),
            requester_id,
            name.to_string(),
            description,
        );

        let members: Vec<ChatMember> = std::iter::once((requester_id, MemberRole::Admin))
            .chain(member_ids.iter().map(|&id| (id, MemberRole::Member)))
            .map(|(user_id, role)| ChatMember {
                chat_id: chat.id,
                user_id,
                role,
                joined_at: chat.created_at,
            })
            .collect();

        self.ctx
            .chat_repo()
            .create_with_members(&chat, &members)
            .await?;

        info!(chat_id = %chat.id, members = members.len(), "Group chat created");

        self.with_members(chat).await
    }

    /// Every chat the user belongs to, most recently active first
    ///
    /// Members, latest messages and unread counts are each fetched for all
    /// chats at once, so the number of store calls does not grow with the
    /// number of chats.
    #[instrument(skip(self))]
    pub async fn list_chats(&self, user_id: Snowflake) -> ServiceResult<Vec<ChatSummaryResponse>> {
        let chats = self.ctx.chat_repo().find_by_member(user_id).await?;
        if chats.is_empty() {
            return Ok(Vec::new());
        }
        let chat_ids: Vec<Snowflake> = chats.iter().map(|c| c.id).collect();

        let mut members: HashMap<Snowflake, Vec<MemberWithUser>> = HashMap::new();
        for row in self.ctx.chat_repo().members_with_users_in(&chat_ids).await? {
            members.entry(row.member.chat_id).or_default().push(row);
        }

        let latest = self.ctx.message_repo().find_latest_in(&chat_ids).await?;
        let mut senders: HashMap<Snowflake, User> = members
            .values()
            .flatten()
            .map(|m| (m.user.id, m.user.clone()))
            .collect();
        let missing: Vec<Snowflake> = latest
            .iter()
            .map(|m| m.sender_id)
            .filter(|id| !senders.contains_key(id))
            .collect();
        if !missing.is_empty() {
            for user in self.ctx.user_repo().find_by_ids(&missing).await? {
                senders.insert(user.id, user);
            }
        }
        let mut last_messages: HashMap<Snowflake, LastMessageResponse> = latest
            .into_iter()
            .filter_map(|message| {
                let sender = senders.get(&message.sender_id)?.clone();
                Some((
                    message.chat_id,
                    LastMessageResponse::from(LastMessage { message, sender }),
                ))
            })
            .collect();

        // Counts the user's own messages too: nothing marks them READ.
        let unread: HashMap<Snowflake, i64> = self
            .ctx
            .message_repo()
            .count_unread_in(&chat_ids, user_id)
            .await?
            .into_iter()
            .collect();

        let summaries = chats
            .into_iter()
            .map(|chat| {
                let chat_id = chat.id;
                ChatSummaryResponse {
                    chat: ChatResponse::from(ChatWithMembers {
                        members: members.remove(&chat_id).unwrap_or_default(),
                        chat,
                    }),
                    last_message: last_messages.remove(&chat_id),
                    unread_count: unread.get(&chat_id).copied().unwrap_or(0),
                }
            })
            .collect();

        Ok(summaries)
    }

    async fn with_members(&self, chat: Chat) -> ServiceResult<ChatResponse> {
        let members = self.ctx.chat_repo().members_with_users(chat.id).await?;
        Ok(ChatResponse::from(ChatWithMembers { chat, members }))
    }
}

/// Collapse duplicates (keeping first-seen order) and drop the requester
fn normalize_member_ids(requester_id: Snowflake, member_ids: &[Snowflake]) -> Vec<Snowflake> {
    let mut seen = HashSet::with_capacity(member_ids.len());
    member_ids
        .iter()
        .copied()
        .filter(|&id| id != requester_id && seen.insert(id))
        .collect()
}
