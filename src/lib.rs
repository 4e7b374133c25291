//! # Generate Assessment
//!
//! 生成两道选择题的测评材料：两张图片、一份 docx、一个可直接上传的目录及其 zip，
//! 并可选推送到 git 远程仓库
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 唯一的题目来源 `Assessment`，以及 `@tag` 标记行格式
//!
//! ### ② 基础设施层（Infrastructure）
//! - `Rasterizer` - 持有字体库，SVG → PNG
//! - `GitRunner` - 执行 git 子命令
//! - `archive` / `FreshDir` - zip 压缩与"先清空再生成"
//!
//! ### ③ 业务能力层（Services）
//! - `table_image` / `circle_image` - 两张图片
//! - `DocumentComposer` - docx
//! - `PackageAssembler` - 打包目录 + zip
//! - `Publisher` - git 发布
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::App` - 按顺序执行以上步骤
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use cli::Cli;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{builtin_assessment, Assessment, Question};
pub use orchestrator::{App, RunSummary};
