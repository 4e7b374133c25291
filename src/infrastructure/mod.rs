//! 基础设施层（Infrastructure）
//!
//! 持有外部资源（字体库、git 进程、文件系统），只暴露能力，不认识题目

pub mod archive;
pub mod fresh_dir;
pub mod git_runner;
pub mod rasterizer;

pub use fresh_dir::FreshDir;
pub use git_runner::{GitOutput, GitRunner};
pub use rasterizer::Rasterizer;
