//! 发布服务 - 业务能力层
//!
//! 把打包目录初始化为 git 仓库并推送到远程。
//!
//! 阶段严格线性：
//! `Uninitialized → Initialized → Branched → Staged → Committed → RemoteConfigured → Pushed`
//!
//! 任何一步失败立即停止，错误中携带最后完成的阶段；已完成的步骤不回滚
//! （例如推送失败时提交仍然保留）。

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::error::GitError;
use crate::infrastructure::{GitOutput, GitRunner};

/// 固定的提交信息
pub const COMMIT_MESSAGE: &str = "Add generated assessment questions";
/// 远程名
pub const REMOTE_NAME: &str = "origin";

/// 发布阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PublishStage {
    Uninitialized,
    Initialized,
    Branched,
    Staged,
    Committed,
    RemoteConfigured,
    Pushed,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStage::Uninitialized => "未初始化",
            PublishStage::Initialized => "已初始化",
            PublishStage::Branched => "已切换分支",
            PublishStage::Staged => "已暂存",
            PublishStage::Committed => "已提交",
            PublishStage::RemoteConfigured => "已配置远程",
            PublishStage::Pushed => "已推送",
        };
        f.write_str(name)
    }
}

/// 发布结果
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub remote: String,
    pub branch: String,
    /// 本次是否产生了新的提交
    pub created_commit: bool,
    pub stage: PublishStage,
}

/// 发布服务
pub struct Publisher {
    git: GitRunner,
    stage: PublishStage,
}

impl Publisher {
    /// 为 `repo_dir` 创建发布服务
    pub fn new(repo_dir: &Path, identity: Option<(String, String)>) -> Self {
        let mut git = GitRunner::new(repo_dir);
        if let Some((name, email)) = identity {
            git = git.with_identity(&name, &email);
        }
        Self {
            git,
            stage: PublishStage::Uninitialized,
        }
    }

    /// 当前阶段
    pub fn stage(&self) -> PublishStage {
        self.stage
    }

    /// 执行完整的发布流程
    pub async fn publish(&mut self, remote: &str, branch: &str) -> Result<PublishReport, GitError> {
        info!("🚀 开始发布 {} -> {} ({})", self.git.work_dir().display(), remote, branch);

        // 初始化（已存在则跳过）
        if self.git.work_dir().join(".git").exists() {
            info!("仓库已存在，跳过 git init");
        } else {
            self.step(&["init"]).await?;
        }
        self.advance(PublishStage::Initialized);

        self.step(&["checkout", "-B", branch]).await?;
        self.advance(PublishStage::Branched);

        self.step(&["add", "."]).await?;
        self.advance(PublishStage::Staged);

        let created_commit = self.commit().await?;
        self.advance(PublishStage::Committed);

        self.configure_remote(remote).await?;
        self.advance(PublishStage::RemoteConfigured);

        self.step(&["push", "-u", REMOTE_NAME, branch]).await?;
        self.advance(PublishStage::Pushed);

        info!("✅ 已推送到远程: {}", remote);
        Ok(PublishReport {
            remote: remote.to_string(),
            branch: branch.to_string(),
            created_commit,
            stage: self.stage,
        })
    }

    /// 提交暂存内容；没有变化时跳过提交
    async fn commit(&self) -> Result<bool, GitError> {
        let status = self.git.output(&["status", "--porcelain"]).await?;
        if status.success && status.stdout.trim().is_empty() {
            info!("没有需要提交的变更，沿用已有提交");
            return Ok(false);
        }
        self.step(&["commit", "-m", COMMIT_MESSAGE]).await?;
        Ok(true)
    }

    /// 如果已存在 origin 则先移除，再添加新的 origin
    async fn configure_remote(&self, remote: &str) -> Result<(), GitError> {
        let remotes = self.git.output(&["remote"]).await?;
        if remotes.success && remotes.stdout.lines().any(|l| l.trim() == REMOTE_NAME) {
            self.step(&["remote", "remove", REMOTE_NAME]).await?;
        }
        self.step(&["remote", "add", REMOTE_NAME, remote]).await?;
        Ok(())
    }

    /// 执行一步，非零退出码转换为带阶段信息的错误
    async fn step(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        let output = self.git.run(args).await?;
        if output.success {
            return Ok(output);
        }

        warn!("⚠️ {} 失败 (阶段: {}): {}", output.command, self.stage, output.stderr);
        Err(GitError::CommandFailed {
            command: output.command,
            code: output.code,
            stderr: output.stderr,
            reached: self.stage,
        })
    }

    fn advance(&mut self, next: PublishStage) {
        debug_assert!(next > self.stage);
        self.stage = next;
    }
}
