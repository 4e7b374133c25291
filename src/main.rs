use anyhow::Result;
use clap::Parser;
use tracing::error;

use generate_assessment::utils::logging;
use generate_assessment::{App, AppError, Cli, Config, RunSummary};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置：默认值 → 配置文件 → 环境变量 → 命令行
    let config = cli.apply(Config::load()?);

    // 初始化日志
    logging::init(config.verbose_logging);

    let app = App::initialize(config)?;
    match app.run().await {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            // 提示直接写到 stderr，不受日志过滤影响
            if let Some(hint) = e.downcast_ref::<AppError>().and_then(AppError::hint) {
                error!("❌ 发布失败: {}", e);
                eprintln!("{}", hint);
            }
            Err(e)
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!("全部完成，文件位于: {}", summary.base_dir.display());
    println!(" - 图片: {}", summary.figures.options_table.display());
    println!(" - 图片: {}", summary.figures.packed_circles.display());
    println!(" - Docx: {}", summary.document.display());
    println!(" - 仓库目录: {}", summary.repo_dir.display());
    println!(" - Zip: {}", summary.archive_path.display());
    if let Some(report) = &summary.published {
        println!(" - 已推送: {} ({})", report.remote, report.branch);
    }
}
