//! 选项表格图片 - 业务能力层
//!
//! 固定尺寸的三列表格：衬衫 / 裤子 / 帽子，每个选项一个带边框的格子

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::rasterizer::{escape_xml, Rasterizer};

pub const TABLE_WIDTH: u32 = 900;
pub const TABLE_HEIGHT: u32 = 280;

const BOX_WIDTH: u32 = 200;
const BOX_HEIGHT: u32 = 30;
const BOX_PITCH: u32 = 40;
const FIRST_BOX_Y: u32 = 70;
const FONT_SIZE: u32 = 14;

/// 表格中的一列
#[derive(Debug, Clone, Copy)]
pub struct OptionColumn {
    pub heading: &'static str,
    pub x: u32,
    pub items: &'static [&'static str],
}

pub const COLUMNS: [OptionColumn; 3] = [
    OptionColumn {
        heading: "Shirts:",
        x: 20,
        items: &["Tan", "Red", "White", "Yellow"],
    },
    OptionColumn {
        heading: "Pants:",
        x: 260,
        items: &["Black", "Khaki", "Navy"],
    },
    OptionColumn {
        heading: "Hats:",
        x: 500,
        items: &["Blue", "Green", "Brown"],
    },
];

/// 一个格子的位置 (x, y, w, h)
pub fn box_rect(column: &OptionColumn, row: usize) -> (u32, u32, u32, u32) {
    (
        column.x,
        FIRST_BOX_Y + row as u32 * BOX_PITCH,
        BOX_WIDTH,
        BOX_HEIGHT,
    )
}

/// 生成表格的 SVG
///
/// 文字用左上角坐标定位，基线 = 顶部 + 字号，不依赖字体度量。
pub fn table_svg() -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = TABLE_WIDTH,
        h = TABLE_HEIGHT
    );
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        TABLE_WIDTH, TABLE_HEIGHT
    ));
    push_text(&mut svg, 10, 10, "Available Options");

    for column in &COLUMNS {
        push_text(&mut svg, column.x, 40, column.heading);
        for (row, item) in column.items.iter().enumerate() {
            let (x, y, w, h) = box_rect(column, row);
            let _ = write!(
                svg,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="none" stroke="black" stroke-width="1"/>"#
            );
            push_text(&mut svg, x + 5, y + 6, item);
        }
    }

    svg.push_str("</svg>");
    svg
}

fn push_text(svg: &mut String, x: u32, top: u32, text: &str) {
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{baseline}" font-family="sans-serif" font-size="{size}" fill="black">{text}</text>"#,
        baseline = top + FONT_SIZE,
        size = FONT_SIZE,
        text = escape_xml(text)
    );
}

/// 渲染选项表格到 `path`
pub fn render_options_table(rasterizer: &Rasterizer, path: &Path) -> AppResult<()> {
    rasterizer.render_to_file(&table_svg(), TABLE_WIDTH, TABLE_HEIGHT, path)?;
    info!("✓ 已生成 {}", path.display());
    Ok(())
}
