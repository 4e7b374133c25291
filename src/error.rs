use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::publisher::PublishStage;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 图片渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 文档生成错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 压缩包错误
    #[error("压缩包错误: {0}")]
    Archive(#[from] ArchiveError),
    /// Git 发布错误
    #[error("Git错误: {0}")]
    Git(#[from] GitError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 图片渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 网格参数非法
    #[error("非法的圆形网格参数: rows={rows}, cols={cols}, radius={radius}")]
    InvalidGeometry { rows: u32, cols: u32, radius: f64 },
    /// 圆的数量超出上限
    #[error("圆的数量 {count} 超出上限 {max}")]
    TooManyCircles { count: u64, max: u64 },
    /// SVG 解析失败
    #[error("SVG解析失败: {source}")]
    SvgParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 画布创建失败
    #[error("无法创建 {width}x{height} 的画布")]
    CanvasFailed { width: u32, height: u32 },
    /// 画布尺寸超出上限
    #[error("画布 {width}x{height} 超出上限 (单边最大 {max_side} 像素)")]
    CanvasTooLarge { width: u32, height: u32, max_side: u32 },
    /// PNG 编码失败
    #[error("PNG编码失败: {source}")]
    EncodeFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 文档生成错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 读取图片尺寸失败
    #[error("无法读取图片尺寸 ({}): {source}", .path.display())]
    ImageProbeFailed {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// docx 打包失败
    #[error("docx打包失败 ({}): {source}", .path.display())]
    PackFailed {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 删除文件失败
    #[error("删除失败 ({}): {source}", .path.display())]
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 复制文件失败
    #[error("复制文件失败 ({} -> {}): {source}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// 路径没有文件名
    #[error("路径缺少文件名: {}", .path.display())]
    MissingFileName { path: PathBuf },
}

/// 压缩包错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 遍历目录失败
    #[error("遍历目录失败 ({}): {source}", .root.display())]
    WalkFailed {
        root: PathBuf,
        source: walkdir::Error,
    },
    /// 写入压缩条目失败
    #[error("写入压缩条目失败 ({entry}): {source}")]
    EntryFailed {
        entry: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 完成压缩包失败
    #[error("完成压缩包失败 ({}): {source}", .path.display())]
    FinishFailed {
        path: PathBuf,
        source: zip::result::ZipError,
    },
}

/// Git 发布错误
#[derive(Debug, Error)]
pub enum GitError {
    /// 无法启动 git 进程
    #[error("无法执行 `{command}`: {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },
    /// git 命令返回非零状态
    #[error("`{command}` 执行失败 (退出码: {code:?}, 已完成阶段: {reached}): {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
        reached: PublishStage,
    },
}

impl GitError {
    /// 失败前最后完成的发布阶段
    pub fn reached(&self) -> Option<PublishStage> {
        match self {
            GitError::CommandFailed { reached, .. } => Some(*reached),
            GitError::SpawnFailed { .. } => None,
        }
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 ({}): {source}", .path.display())]
    FileReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败: {source}")]
    TomlParseFailed { source: toml::de::Error },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(source: toml::de::Error) -> Self {
        ConfigError::TomlParseFailed { source }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn write_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn read_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建删除错误
    pub fn delete_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::DeleteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建目录创建错误
    pub fn create_dir_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建文件复制错误
    pub fn copy_failed(
        from: impl AsRef<Path>,
        to: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        AppError::File(FileError::CopyFailed {
            from: from.as_ref().to_path_buf(),
            to: to.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建 docx 打包错误
    pub fn pack_failed(
        path: impl AsRef<Path>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Document(DocumentError::PackFailed {
            path: path.as_ref().to_path_buf(),
            source: Box::new(source),
        })
    }

    /// 是否为 git 发布阶段的错误
    pub fn is_git(&self) -> bool {
        matches!(self, AppError::Git(_))
    }

    /// 面向用户的排查提示，目前只有 git 错误带提示
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Git(_) => Some(GIT_HINT),
            _ => None,
        }
    }
}

/// git 失败时输出到 stderr 的提示
pub const GIT_HINT: &str = "Git 命令执行失败，请确认已安装 git，并且具备网络访问和推送权限";

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_error_reports_reached_stage() {
        let err = GitError::CommandFailed {
            command: "git push -u origin main".to_string(),
            code: Some(128),
            stderr: "fatal: repository not found".to_string(),
            reached: PublishStage::RemoteConfigured,
        };

        assert_eq!(err.reached(), Some(PublishStage::RemoteConfigured));
        let message = err.to_string();
        assert!(message.contains("git push -u origin main"));
        assert!(message.contains("repository not found"));
    }

    #[test]
    fn test_app_error_is_git() {
        let err: AppError = GitError::SpawnFailed {
            command: "git init".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "git"),
        }
        .into();
        assert!(err.is_git());

        let err = AppError::write_failed("a.txt", std::io::Error::other("disk full"));
        assert!(!err.is_git());
        assert!(err.to_string().contains("a.txt"));
    }

    #[test]
    fn test_only_git_errors_carry_hint() {
        let err: AppError = GitError::CommandFailed {
            command: "git push -u origin main".to_string(),
            code: Some(128),
            stderr: String::new(),
            reached: PublishStage::RemoteConfigured,
        }
        .into();
        assert_eq!(err.hint(), Some(GIT_HINT));

        let err = AppError::write_failed("a.txt", std::io::Error::other("disk full"));
        assert_eq!(err.hint(), None);
    }
}
