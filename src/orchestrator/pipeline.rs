//! 生成流水线 - 编排层
//!
//! ## 职责
//!
//! 按固定顺序调用各个业务能力，前一步的输出文件就是后一步的输入：
//!
//! ```text
//! 表格图片 ─┐
//!           ├─> docx ─> 打包目录 + zip ─> (可选) git 发布
//! 圆形图片 ─┘
//! ```
//!
//! - 持有配置和光栅化器（字体库只加载一次）
//! - 不做具体渲染，不拼接文本
//! - 任何一步失败立即返回，已生成的文件保留

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::Rasterizer;
use crate::models::{builtin_assessment, Assessment};
use crate::services::{
    render_options_table, render_packed_circles, DocumentComposer, FigurePaths,
    PackageAssembler, PublishReport, Publisher,
};
use crate::utils::logging::{self, truncate_text};

pub const DOCUMENT_NAME: &str = "generated_assessment.docx";

/// 俯视图参数：两行四列，半径 2
pub const PACKAGE_ROWS: u32 = 2;
pub const PACKAGE_COLS: u32 = 4;
pub const PACKAGE_RADIUS: f64 = 2.0;

/// 一次运行生成的所有路径
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub base_dir: PathBuf,
    pub figures: FigurePaths,
    pub document: PathBuf,
    pub repo_dir: PathBuf,
    pub archive_path: PathBuf,
    pub archive_entries: Vec<String>,
    pub published: Option<PublishReport>,
}

/// 应用主结构
pub struct App {
    config: Config,
    base_dir: PathBuf,
    rasterizer: Rasterizer,
    assessment: Assessment,
}

impl App {
    /// 初始化应用：解析输出目录并创建、加载字体
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let base_dir = if config.output_dir.is_absolute() {
            config.output_dir.clone()
        } else {
            std::env::current_dir()
                .context("无法获取当前工作目录")?
                .join(&config.output_dir)
        };
        std::fs::create_dir_all(&base_dir)
            .with_context(|| format!("无法创建输出目录: {}", base_dir.display()))?;

        let rasterizer = Rasterizer::new(config.font_path.as_deref());

        Ok(Self {
            config,
            base_dir,
            rasterizer,
            assessment: builtin_assessment(),
        })
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// 运行主流程
    pub async fn run(&self) -> Result<RunSummary> {
        let total = if self.config.push_repo.is_some() { 5 } else { 4 };
        let figures = FigurePaths::in_dir(&self.base_dir);
        let document = self.base_dir.join(DOCUMENT_NAME);

        logging::log_stage(1, total, "渲染选项表格");
        render_options_table(&self.rasterizer, &figures.options_table)?;

        logging::log_stage(2, total, "渲染包装盒俯视图");
        render_packed_circles(
            &self.rasterizer,
            &figures.packed_circles,
            PACKAGE_ROWS,
            PACKAGE_COLS,
            PACKAGE_RADIUS,
        )?;

        logging::log_stage(3, total, "生成 docx 文档");
        for q in &self.assessment.questions {
            info!("题目 {}: {}", q.order, truncate_text(&q.prompt, 60));
        }
        DocumentComposer::new().compose(&self.assessment, &figures, &document)?;

        logging::log_stage(4, total, "生成打包目录与压缩包");
        let package = PackageAssembler::new(&self.base_dir)
            .assemble(&self.assessment, &figures.all(), &document)
            .await?;

        let published = match &self.config.push_repo {
            Some(remote) => {
                logging::log_stage(5, total, "发布到远程仓库");
                let mut publisher =
                    Publisher::new(&package.repo_dir, self.config.git_identity());
                let report = publisher
                    .publish(remote, &self.config.branch)
                    .await
                    .map_err(AppError::from)?;
                Some(report)
            }
            None => None,
        };

        logging::log_finished();

        Ok(RunSummary {
            base_dir: self.base_dir.clone(),
            figures,
            document,
            repo_dir: package.repo_dir,
            archive_path: package.archive_path,
            archive_entries: package.entries,
            published,
        })
    }
}
