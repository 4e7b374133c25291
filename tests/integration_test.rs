use std::path::Path;
use std::process::Command;

use generate_assessment::infrastructure::archive;
use generate_assessment::services::package_assembler::{QUESTIONS_NAME, README_NAME};
use generate_assessment::services::PublishStage;
use generate_assessment::utils::logging;
use generate_assessment::{App, AppError, Config};

fn config_for(dir: &Path) -> Config {
    Config {
        output_dir: dir.to_path_buf(),
        git_author_name: Some("Assessment Bot".to_string()),
        git_author_email: Some("bot@example.com".to_string()),
        ..Config::default()
    }
}

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

/// 包目录下所有文件的相对路径
fn files_under(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(root).unwrap();
            let name: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(name.join("/"));
        }
    }
    sorted(files)
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[tokio::test]
async fn test_full_pipeline_without_publish() {
    logging::init(false);
    let tmp = tempfile::tempdir().unwrap();

    let summary = App::initialize(config_for(tmp.path()))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(summary.figures.options_table.exists());
    assert!(summary.figures.packed_circles.exists());
    assert!(summary.document.exists());
    assert!(summary.published.is_none());

    // 俯视图画布 2:1
    let (w, h) = image::image_dimensions(&summary.figures.packed_circles).unwrap();
    assert_eq!(w, 2 * h);

    // 压缩包条目与目录文件一一对应，且不带目录名前缀
    let listed = sorted(archive::list_entries(&summary.archive_path).unwrap());
    assert_eq!(listed, files_under(&summary.repo_dir));
    assert_eq!(
        listed,
        vec![
            "QUESTIONS.md",
            "README.md",
            "generated_assessment.docx",
            "images/rect_package_topview_8.png",
            "images/uniform_table.png",
        ]
    );
}

#[tokio::test]
async fn test_rerun_is_repeatable_and_clears_stale_files() {
    logging::init(false);
    let tmp = tempfile::tempdir().unwrap();

    let first = App::initialize(config_for(tmp.path()))
        .unwrap()
        .run()
        .await
        .unwrap();
    let questions_1 = std::fs::read(first.repo_dir.join(QUESTIONS_NAME)).unwrap();
    let readme_1 = std::fs::read(first.repo_dir.join(README_NAME)).unwrap();
    std::fs::write(first.repo_dir.join("stale.txt"), "manual edit").unwrap();

    let second = App::initialize(config_for(tmp.path()))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(!second.repo_dir.join("stale.txt").exists());
    assert_eq!(
        std::fs::read(second.repo_dir.join(QUESTIONS_NAME)).unwrap(),
        questions_1
    );
    assert_eq!(
        std::fs::read(second.repo_dir.join(README_NAME)).unwrap(),
        readme_1
    );
    assert_eq!(
        sorted(archive::list_entries(&second.archive_path).unwrap()),
        sorted(first.archive_entries.clone())
    );
}

#[tokio::test]
async fn test_publish_failure_then_fixed_remote() {
    if !git_available() {
        return;
    }
    logging::init(false);
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out");
    let missing = tmp.path().join("missing.git");

    let mut config = config_for(&out);
    config.push_repo = Some(missing.to_string_lossy().into_owned());
    let err = App::initialize(config).unwrap().run().await.unwrap_err();

    let app_err = err.downcast_ref::<AppError>().expect("应为 AppError");
    assert!(app_err.is_git());
    assert!(app_err.hint().is_some());
    if let AppError::Git(git_err) = app_err {
        assert!(git_err.reached().unwrap() >= PublishStage::Committed);
    }
    // 打包产物在发布失败前已经生成
    assert!(out.join("github_repo.zip").exists());

    let remote = tmp.path().join("remote.git");
    let status = Command::new("git")
        .args(["init", "--bare"])
        .arg(&remote)
        .status()
        .unwrap();
    assert!(status.success());

    let mut config = config_for(&out);
    config.push_repo = Some(remote.to_string_lossy().into_owned());
    let summary = App::initialize(config).unwrap().run().await.unwrap();

    let report = summary.published.expect("应已发布");
    assert_eq!(report.stage, PublishStage::Pushed);
    assert_eq!(report.branch, "main");
}
