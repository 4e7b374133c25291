//! Git 命令执行器 - 基础设施层
//!
//! 在固定目录下执行 git 子命令，只暴露"执行命令"的能力

use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::GitError;

/// 一次 git 调用的结果
#[derive(Debug)]
pub struct GitOutput {
    pub command: String,
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    fn from_output(command: String, output: Output) -> Self {
        Self {
            command,
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Git 命令执行器
///
/// 职责：
/// - 持有工作目录和附加环境变量
/// - 执行 git 子命令并收集输出
/// - 不认识发布流程的各个阶段
pub struct GitRunner {
    work_dir: PathBuf,
    envs: Vec<(String, String)>,
}

impl GitRunner {
    /// 创建新的执行器
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            envs: Vec::new(),
        }
    }

    /// 设置提交身份（作者与提交者）
    pub fn with_identity(mut self, name: &str, email: &str) -> Self {
        for (key, value) in [
            ("GIT_AUTHOR_NAME", name),
            ("GIT_AUTHOR_EMAIL", email),
            ("GIT_COMMITTER_NAME", name),
            ("GIT_COMMITTER_EMAIL", email),
        ] {
            self.envs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// 工作目录
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// 执行命令并返回输出，非零退出码不视为错误
    pub async fn output(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        let command = format!("git {}", args.join(" "));
        debug!("执行: {} (目录: {})", command, self.work_dir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        Ok(GitOutput::from_output(command, output))
    }

    /// 执行命令，`info` 级别打印命令行
    pub async fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        info!("> git {}", args.join(" "));
        self.output(args).await
    }
}
