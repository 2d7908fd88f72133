//! Session Registry Port - 用户 → 播放列表会话
//!
//! 定义会话注册表的抽象接口，具体实现在 infrastructure/memory 层

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::playlist::PlaylistSession;

/// 共享会话句柄
///
/// 同一用户的所有操作经由该互斥锁串行化，读者不会看到重排到一半的状态
pub type SharedSession = Arc<Mutex<PlaylistSession>>;

/// Session Registry 错误
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No active session for user: {0}")]
    NotFound(String),
}

/// Session Registry Port
///
/// 每个活跃用户一个会话，首次请求时创建，来源切换时整体替换
pub trait SessionRegistryPort: Send + Sync {
    /// 获取会话
    fn get(&self, user: &str) -> Result<SharedSession, RegistryError>;

    /// 获取会话（不存在时返回 None）
    fn find(&self, user: &str) -> Option<SharedSession>;

    /// 放入会话，已有会话被整体替换
    fn insert(&self, user: &str, session: PlaylistSession) -> SharedSession;

    /// 会话仍然空闲时才移除，检查与移除是原子的；返回是否移除
    ///
    /// 检查之后刚被替换或 touch 的会话不会被误删
    fn remove_if_idle(&self, user: &str, idle_timeout_secs: u64) -> bool;

    /// 更新最后活动时间
    fn touch(&self, user: &str);

    /// 获取所有过期会话的用户
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;

    /// 活跃会话数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
