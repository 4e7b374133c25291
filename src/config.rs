use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 默认配置文件名（位于当前工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "assessment.toml";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 输出目录
    pub output_dir: PathBuf,
    /// 远程仓库地址（为空则不发布）
    pub push_repo: Option<String>,
    /// 推送分支
    pub branch: String,
    /// 渲染图片使用的字体文件
    pub font_path: Option<PathBuf>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- Git 提交身份 ---
    pub git_author_name: Option<String>,
    pub git_author_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("assessment_output"),
            push_repo: None,
            branch: "main".to_string(),
            font_path: None,
            verbose_logging: false,
            git_author_name: None,
            git_author_email: None,
        }
    }
}

/// TOML 配置文件结构，所有字段均可省略
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    output_dir: Option<PathBuf>,
    push_repo: Option<String>,
    branch: Option<String>,
    font_path: Option<PathBuf>,
    verbose_logging: Option<bool>,
    git: GitSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GitSection {
    author_name: Option<String>,
    author_email: Option<String>,
}

impl Config {
    /// 按 默认值 → 配置文件 → 环境变量 的顺序加载配置
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        let file = match std::env::var("ASSESSMENT_CONFIG") {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            }
        };
        if let Some(path) = file {
            config = config.merge_file(&path)?;
        }

        config.merge_env_with(|key| std::env::var(key).ok())
    }

    /// 合并 TOML 配置文件
    pub fn merge_file(self, path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::FileReadFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.merge_toml(&content)
    }

    /// 合并 TOML 文本
    pub fn merge_toml(mut self, content: &str) -> AppResult<Self> {
        let file: FileConfig = toml::from_str(content).map_err(ConfigError::from)?;

        if let Some(v) = file.output_dir {
            self.output_dir = v;
        }
        if let Some(v) = file.push_repo {
            self.push_repo = Some(v);
        }
        if let Some(v) = file.branch {
            self.branch = v;
        }
        if let Some(v) = file.font_path {
            self.font_path = Some(v);
        }
        if let Some(v) = file.verbose_logging {
            self.verbose_logging = v;
        }
        if let Some(v) = file.git.author_name {
            self.git_author_name = Some(v);
        }
        if let Some(v) = file.git.author_email {
            self.git_author_email = Some(v);
        }

        Ok(self)
    }

    /// 用环境变量覆盖配置，`lookup` 负责取值（便于测试）
    pub fn merge_env_with<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ASSESSMENT_OUTDIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("ASSESSMENT_PUSH_REPO").filter(|v| !v.is_empty()) {
            self.push_repo = Some(v);
        }
        if let Some(v) = lookup("ASSESSMENT_BRANCH") {
            self.branch = v;
        }
        if let Some(v) = lookup("ASSESSMENT_FONT") {
            self.font_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = v.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "VERBOSE_LOGGING".to_string(),
                value: v.clone(),
                expected_type: "bool".to_string(),
            })?;
        }
        if let Some(v) = lookup("ASSESSMENT_GIT_AUTHOR_NAME") {
            self.git_author_name = Some(v);
        }
        if let Some(v) = lookup("ASSESSMENT_GIT_AUTHOR_EMAIL") {
            self.git_author_email = Some(v);
        }

        Ok(self)
    }

    /// 只有姓名和邮箱都配置时才返回提交身份
    pub fn git_identity(&self) -> Option<(String, String)> {
        match (&self.git_author_name, &self.git_author_email) {
            (Some(name), Some(email)) => Some((name.clone(), email.clone())),
            _ => None,
        }
    }
}
