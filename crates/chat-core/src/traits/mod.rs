mod repositories;

pub use repositories::{
    ChatRepository, MemberRepository, MemberWithUser, MessageRepository, RepoResult,
    UserRepository,
};
