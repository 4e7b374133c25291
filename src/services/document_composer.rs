//! 文档生成服务 - 业务能力层
//!
//! 把 `Assessment` 写成 .docx：标题、头部标记行、每道题的标记行和配图。
//! 题目内容与 QUESTIONS.md 来自同一个 `Assessment`，标记行由
//! `models::tagged` 统一生成。

use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{BreakType, Docx, Paragraph, Pic, Run, Style, StyleType};
use tracing::{debug, info};

use crate::error::{AppError, AppResult, DocumentError};
use crate::models::tagged::{header_lines, question_lines};
use crate::models::{Assessment, Figure};

pub const DOCUMENT_HEADING: &str = "Generated Assessment Questions";
pub const MCQ_BLOCK_COMMENT: &str =
    "// Use this block for each question when adding Multiple Choice Questions (MCQ)";

/// 图片在文档中的显示宽度（英寸）
pub const FIGURE_WIDTH_INCHES: f64 = 6.0;
const EMU_PER_INCH: f64 = 914_400.0;

/// 已渲染图片的路径
#[derive(Debug, Clone)]
pub struct FigurePaths {
    pub options_table: PathBuf,
    pub packed_circles: PathBuf,
}

impl FigurePaths {
    /// 默认文件名位于 `dir` 下
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            options_table: dir.join(Figure::OptionsTable.file_name()),
            packed_circles: dir.join(Figure::PackedCircles.file_name()),
        }
    }

    pub fn get(&self, figure: Figure) -> &Path {
        match figure {
            Figure::OptionsTable => &self.options_table,
            Figure::PackedCircles => &self.packed_circles,
        }
    }

    pub fn all(&self) -> [&Path; 2] {
        [&self.options_table, &self.packed_circles]
    }
}

/// 文档中的一个块
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// 一级标题
    Heading(String),
    /// 段落；`leading_break` 表示段首先换一行
    Paragraph { leading_break: bool, text: String },
    /// 配图
    Figure(Figure),
}

impl Block {
    fn text(text: impl Into<String>) -> Self {
        Block::Paragraph {
            leading_break: false,
            text: text.into(),
        }
    }

    fn after_break(text: impl Into<String>) -> Self {
        Block::Paragraph {
            leading_break: true,
            text: text.into(),
        }
    }
}

/// 生成文档的块序列
pub fn plan(assessment: &Assessment) -> Vec<Block> {
    let mut blocks = vec![Block::Heading(DOCUMENT_HEADING.to_string())];
    blocks.extend(header_lines(assessment).iter().map(|l| Block::text(l.to_string())));
    blocks.push(Block::after_break(MCQ_BLOCK_COMMENT));

    for question in &assessment.questions {
        for (i, line) in question_lines(question).iter().enumerate() {
            if i == 0 {
                blocks.push(Block::after_break(line.to_string()));
            } else {
                blocks.push(Block::text(line.to_string()));
            }
        }
        blocks.push(Block::Figure(question.figure));
    }
    blocks
}

/// 文档生成服务
pub struct DocumentComposer {
    figure_width_emu: u32,
}

impl DocumentComposer {
    pub fn new() -> Self {
        Self {
            figure_width_emu: (FIGURE_WIDTH_INCHES * EMU_PER_INCH) as u32,
        }
    }

    /// 生成 docx 并写入 `output`
    pub fn compose(
        &self,
        assessment: &Assessment,
        figures: &FigurePaths,
        output: &Path,
    ) -> AppResult<()> {
        let heading_style = Style::new("Heading1", StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold();
        let mut docx = Docx::new().add_style(heading_style);

        for block in plan(assessment) {
            let paragraph = match block {
                Block::Heading(text) => Paragraph::new()
                    .add_run(Run::new().add_text(text))
                    .style("Heading1"),
                Block::Paragraph {
                    leading_break,
                    text,
                } => {
                    let mut run = Run::new();
                    if leading_break {
                        run = run.add_break(BreakType::TextWrapping);
                    }
                    Paragraph::new().add_run(run.add_text(text))
                }
                Block::Figure(figure) => {
                    let pic = self.load_picture(figures.get(figure))?;
                    Paragraph::new().add_run(Run::new().add_image(pic))
                }
            };
            docx = docx.add_paragraph(paragraph);
        }

        let file = File::create(output).map_err(|e| AppError::write_failed(output, e))?;
        docx.build()
            .pack(file)
            .map_err(|e| AppError::pack_failed(output, e))?;

        info!("✓ 已生成 {}", output.display());
        Ok(())
    }

    /// 读取图片并按固定显示宽度等比缩放
    fn load_picture(&self, path: &Path) -> AppResult<Pic> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            DocumentError::ImageProbeFailed {
                path: path.to_path_buf(),
                source: Box::new(e),
            }
        })?;
        let bytes = std::fs::read(path).map_err(|e| AppError::read_failed(path, e))?;

        let (w_emu, h_emu) = self.display_size(width, height);
        debug!(
            "嵌入图片 {} ({}x{} px -> {}x{} EMU)",
            path.display(),
            width,
            height,
            w_emu,
            h_emu
        );
        Ok(Pic::new(&bytes).size(w_emu, h_emu))
    }

    /// 固定宽度下的显示尺寸（EMU）
    pub fn display_size(&self, width_px: u32, height_px: u32) -> (u32, u32) {
        let w = self.figure_width_emu;
        let h = (w as f64 * height_px as f64 / width_px.max(1) as f64).round() as u32;
        (w, h)
    }
}

impl Default for DocumentComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::Rasterizer;
    use crate::models::builtin_assessment;
    use crate::services::{circle_image, table_image};
    use std::io::Read;

    fn paragraph_texts(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_plan_order() {
        let blocks = plan(&builtin_assessment());

        assert_eq!(blocks[0], Block::Heading(DOCUMENT_HEADING.to_string()));
        let texts = paragraph_texts(&blocks);
        assert!(texts[0].starts_with("@title "));
        assert!(texts[1].starts_with("@description "));
        assert_eq!(texts[2], MCQ_BLOCK_COMMENT);
        assert!(texts[3].starts_with("@question Each student"));

        let figures: Vec<Figure> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Figure(f) => Some(*f),
                _ => None,
            })
            .collect();
        assert_eq!(figures, vec![Figure::OptionsTable, Figure::PackedCircles]);
        // 配图紧跟在 @plusmarks 之后
        let pos = blocks
            .iter()
            .position(|b| *b == Block::Figure(Figure::OptionsTable))
            .unwrap();
        assert_eq!(blocks[pos - 1], Block::text("@plusmarks 1"));
    }

    #[test]
    fn test_plan_option_blocks() {
        let blocks = plan(&builtin_assessment());
        let texts = paragraph_texts(&blocks);

        let options = texts
            .iter()
            .filter(|t| t.starts_with("@option") || t.starts_with("@@option"))
            .count();
        let correct = texts.iter().filter(|t| t.starts_with("@@option")).count();
        assert_eq!(options, 10);
        assert_eq!(correct, 2);
    }

    #[test]
    fn test_questions_start_after_a_break() {
        let blocks = plan(&builtin_assessment());
        for block in &blocks {
            if let Block::Paragraph {
                leading_break,
                text,
            } = block
            {
                let expect = text.starts_with("@question") || text == MCQ_BLOCK_COMMENT;
                assert_eq!(*leading_break, expect, "段落: {}", text);
            }
        }
    }

    #[test]
    fn test_display_size_keeps_aspect_ratio() {
        let composer = DocumentComposer::new();
        assert_eq!(composer.display_size(480, 240), (5_486_400, 2_743_200));
        assert_eq!(composer.display_size(900, 280).0, 5_486_400);
    }

    #[test]
    fn test_compose_writes_docx() {
        let dir = tempfile::tempdir().unwrap();
        let rasterizer = Rasterizer::new(None);
        let figures = FigurePaths::in_dir(dir.path());
        table_image::render_options_table(&rasterizer, &figures.options_table).unwrap();
        circle_image::render_packed_circles(&rasterizer, &figures.packed_circles, 2, 4, 2.0)
            .unwrap();
        let output = dir.path().join("generated_assessment.docx");

        DocumentComposer::new()
            .compose(&builtin_assessment(), &figures, &output)
            .unwrap();

        let file = File::open(&output).unwrap();
        let mut docx = zip::ZipArchive::new(file).unwrap();
        let mut xml = String::new();
        docx.by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains(DOCUMENT_HEADING));
        assert!(xml.contains("@Order 1"));
        assert!(xml.contains("@Order 2"));
        assert_eq!(xml.matches("@@option").count(), 2);
    }

    #[test]
    fn test_compose_fails_when_figure_missing() {
        let dir = tempfile::tempdir().unwrap();
        let figures = FigurePaths::in_dir(dir.path());
        let output = dir.path().join("out.docx");

        let err = DocumentComposer::new()
            .compose(&builtin_assessment(), &figures, &output)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Document(DocumentError::ImageProbeFailed { .. })
        ));
    }
}
