//! Session Sweeper - 后台清理空闲会话
//!
//! 按固定间隔扫描会话注册表，移除超过空闲时长的会话

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::SessionRegistryPort;
use crate::application::token_tag;

/// Sweeper 配置
#[derive(Debug, Clone)]
pub struct SessionSweeperConfig {
    /// 扫描间隔（秒）
    pub interval_secs: u64,
    /// 会话空闲多久后移除（秒）
    pub session_expire_secs: u64,
}

impl Default for SessionSweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            session_expire_secs: 86400,
        }
    }
}

/// 空闲会话清理器
pub struct SessionSweeper {
    config: SessionSweeperConfig,
    registry: Arc<dyn SessionRegistryPort>,
}

impl SessionSweeper {
    pub fn new(config: SessionSweeperConfig, registry: Arc<dyn SessionRegistryPort>) -> Self {
        Self { config, registry }
    }

    /// 启动 Sweeper（不会返回，随进程退出）
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            session_expire_secs = self.config.session_expire_secs,
            "SessionSweeper started"
        );

        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs.max(1)));
        // 第一次 tick 立即返回
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.sweep_once();
        }
    }

    /// 执行一次清理，返回移除的会话数
    pub fn sweep_once(&self) -> usize {
        let expired = self
            .registry
            .get_expired_sessions(self.config.session_expire_secs);

        // 过期列表只是快照，移除时再原子地确认一次
        let mut removed = 0;
        for user in expired {
            if self
                .registry
                .remove_if_idle(&user, self.config.session_expire_secs)
            {
                removed += 1;
            } else {
                tracing::debug!(user = %token_tag(&user), "Session became active again, kept");
            }
        }

        if removed > 0 {
            tracing::info!(
                removed,
                remaining = self.registry.len(),
                "Idle sessions swept"
            );
        }
        removed
    }
}
