use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::DomainError;

/// 已知事件分类，`key()` 即注册表中的分类键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    UserCreate,
    UserDestroy,
    GroupCreate,
    GroupRename,
    GroupDestroy,
    UserAddToGroup,
    UserRemoveFromGroup,
    ProjectCreate,
    ProjectRename,
    ProjectUpdate,
    ProjectDestroy,
    Push,
    TagPush,
    RepositoryUpdate,
    MergeRequest,
}

impl EventCategory {
    pub const ALL: [EventCategory; 15] = [
        Self::UserCreate,
        Self::UserDestroy,
        Self::GroupCreate,
        Self::GroupRename,
        Self::GroupDestroy,
        Self::UserAddToGroup,
        Self::UserRemoveFromGroup,
        Self::ProjectCreate,
        Self::ProjectRename,
        Self::ProjectUpdate,
        Self::ProjectDestroy,
        Self::Push,
        Self::TagPush,
        Self::RepositoryUpdate,
        Self::MergeRequest,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::UserCreate => "user_create",
            Self::UserDestroy => "user_destroy",
            Self::GroupCreate => "group_create",
            Self::GroupRename => "group_rename",
            Self::GroupDestroy => "group_destroy",
            Self::UserAddToGroup => "user_add_to_group",
            Self::UserRemoveFromGroup => "user_remove_from_group",
            Self::ProjectCreate => "project_create",
            Self::ProjectRename => "project_rename",
            Self::ProjectUpdate => "project_update",
            Self::ProjectDestroy => "project_destroy",
            Self::Push => "push",
            Self::TagPush => "tag_push",
            Self::RepositoryUpdate => "repository_update",
            Self::MergeRequest => "merge_request",
        }
    }
}

impl Display for EventCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EventCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| DomainError::invalid_value(format!("unknown event category: {s}")))
    }
}
