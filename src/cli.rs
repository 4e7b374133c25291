//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// 生成测评材料（图片 + docx + 可上传目录 + zip），可选推送到 git 远程
#[derive(Parser, Debug)]
#[command(name = "generate_assessment", version, about)]
pub struct Cli {
    /// 输出目录（默认: assessment_output）
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// 要推送到的远程 git 仓库地址（可选）
    #[arg(long = "push-repo")]
    pub push_repo: Option<String>,

    /// 推送分支（默认: main）
    #[arg(long)]
    pub branch: Option<String>,
}

impl Cli {
    /// 命令行参数覆盖已加载的配置
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(outdir) = self.outdir {
            config.output_dir = outdir;
        }
        if let Some(remote) = self.push_repo {
            config.push_repo = Some(remote);
        }
        if let Some(branch) = self.branch {
            config.branch = branch;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_from_config() {
        let cli = Cli::try_parse_from(["generate_assessment"]).unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.output_dir, PathBuf::from("assessment_output"));
        assert_eq!(config.branch, "main");
        assert!(config.push_repo.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "generate_assessment",
            "--outdir",
            "out",
            "--push-repo",
            "https://example.com/repo.git",
            "--branch",
            "gh-pages",
        ])
        .unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(
            config.push_repo.as_deref(),
            Some("https://example.com/repo.git")
        );
        assert_eq!(config.branch, "gh-pages");
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["generate_assessment", "--force"]).is_err());
    }
}
