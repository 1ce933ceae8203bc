//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateDirectChatRequest, CreateGroupChatRequest, LoginRequest, RegisterRequest,
    SendMessageRequest,
};

pub use responses::{
    AuthResponse, ChatResponse, ChatSummaryResponse, DirectChatResponse, LastMessageResponse,
    MemberResponse, MessageResponse, MessageStatusResponse, ProfileResponse, SenderResponse,
    UserResponse,
};

pub use mappers::{ChatWithMembers, LastMessage, MessageWithDetails};
