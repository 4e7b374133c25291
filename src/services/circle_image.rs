//! 密排圆俯视图 - 业务能力层
//!
//! `rows x cols` 个空心圆，相邻圆相切（圆心距 = 直径），无坐标轴

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::error::{AppResult, RenderError};
use crate::infrastructure::rasterizer::MAX_CANVAS_SIDE;
use crate::infrastructure::Rasterizer;

/// 每单位长度对应的像素数（画布超出上限时按比例缩小）
pub const PIXELS_PER_UNIT: f64 = 30.0;

/// 单张图中圆的最大数量
pub const MAX_CIRCLES: u64 = 1_000_000;

const STROKE_WIDTH: f64 = 1.5;

/// 圆形网格布局
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGrid {
    rows: u32,
    cols: u32,
    radius: f64,
    /// 实际使用的 像素/单位
    scale: f64,
}

impl CircleGrid {
    /// 创建网格，行列数必须为正，半径必须为有限正数
    ///
    /// 长边超过 `MAX_CANVAS_SIDE` 时整体等比缩小，宽高比不变
    pub fn new(rows: u32, cols: u32, radius: f64) -> AppResult<Self> {
        if rows == 0 || cols == 0 || !radius.is_finite() || radius <= 0.0 {
            return Err(RenderError::InvalidGeometry { rows, cols, radius }.into());
        }
        let count = rows as u64 * cols as u64;
        if count > MAX_CIRCLES {
            return Err(RenderError::TooManyCircles {
                count,
                max: MAX_CIRCLES,
            }
            .into());
        }

        let long_side_units = rows.max(cols) as f64 * 2.0 * radius;
        if !long_side_units.is_finite() {
            return Err(RenderError::InvalidGeometry { rows, cols, radius }.into());
        }
        let scale = PIXELS_PER_UNIT.min(MAX_CANVAS_SIDE as f64 / long_side_units);

        Ok(Self {
            rows,
            cols,
            radius,
            scale,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// 像素直径
    pub fn diameter_px(&self) -> f64 {
        2.0 * self.radius * self.scale
    }

    /// 画布尺寸 (宽, 高) = (cols * 直径, rows * 直径)，每边至少 1 像素
    pub fn canvas_size(&self) -> (u32, u32) {
        let d = self.diameter_px();
        let side = |n: u32| (n as f64 * d).round().max(1.0) as u32;
        (side(self.cols), side(self.rows))
    }

    /// 所有圆心，按行优先顺序
    pub fn centers(&self) -> Vec<(f64, f64)> {
        let d = self.diameter_px();
        let r = d / 2.0;
        (0..self.rows)
            .flat_map(|i| (0..self.cols).map(move |j| (j as f64 * d + r, i as f64 * d + r)))
            .collect()
    }

    /// 生成 SVG
    ///
    /// 圆按完整半径绘制，相邻圆的描边相接；viewBox 向外扩半个线宽，
    /// 边缘的圆不被裁掉，画布像素尺寸保持不变
    pub fn to_svg(&self) -> String {
        let (w, h) = self.canvas_size();
        let r = self.diameter_px() / 2.0;
        let pad = STROKE_WIDTH / 2.0;
        let (vw, vh) = (w as f64 + STROKE_WIDTH, h as f64 + STROKE_WIDTH);

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="-{pad} -{pad} {vw} {vh}">"#
        );
        for (cx, cy) in self.centers() {
            let _ = write!(
                svg,
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="black" stroke-width="{STROKE_WIDTH}"/>"#
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

/// 渲染密排圆俯视图到 `path`
pub fn render_packed_circles(
    rasterizer: &Rasterizer,
    path: &Path,
    rows: u32,
    cols: u32,
    radius: f64,
) -> AppResult<()> {
    let grid = CircleGrid::new(rows, cols, radius)?;
    let (w, h) = grid.canvas_size();
    rasterizer.render_to_file(&grid.to_svg(), w, h, path)?;
    info!("✓ 已生成 {} ({}x{} 个圆)", path.display(), rows, cols);
    Ok(())
}
