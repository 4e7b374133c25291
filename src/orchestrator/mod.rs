//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (按顺序调度各步骤)
//!     ↓
//! services (能力层：表格 / 圆形 / docx / 打包 / 发布)
//!     ↓
//! infrastructure (基础设施：Rasterizer / GitRunner / zip / FreshDir)
//! ```
//!
//! 编排层只做调度和日志，不做具体业务判断

pub mod pipeline;

pub use pipeline::{App, RunSummary};
