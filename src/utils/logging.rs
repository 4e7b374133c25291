/// 日志工具模块
///
/// 提供日志初始化和阶段输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`；未设置时默认 `info`，详细模式为 `debug`。
/// 重复调用不会报错（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 测评材料生成");
    info!("📁 输出目录: {}", config.output_dir.display());
    match &config.push_repo {
        Some(remote) => info!("📤 发布到: {} (分支: {})", remote, config.branch),
        None => info!("📤 未指定远程仓库，跳过发布"),
    }
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始
///
/// # 参数
/// - `step`: 当前阶段编号（从1开始）
/// - `total`: 阶段总数
/// - `name`: 阶段名称
pub fn log_stage(step: usize, total: usize, name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📦 [{}/{}] {}", step, total, name);
    info!("{}", "─".repeat(60));
}

/// 打印完成时间
pub fn log_finished() {
    info!("\n{}", "=".repeat(60));
    info!(
        "📊 全部完成 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("× × ×", 3), "× ×...");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
