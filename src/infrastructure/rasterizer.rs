//! SVG 光栅化器 - 基础设施层
//!
//! 持有唯一的字体库，只暴露"把 SVG 画成 PNG"的能力

use std::path::Path;
use std::sync::Arc;

use resvg::tiny_skia::{Color, Pixmap};
use resvg::usvg::{self, fontdb};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, RenderError};

/// 画布单边的最大像素数
pub const MAX_CANVAS_SIDE: u32 = 4096;

/// SVG 光栅化器
///
/// 职责：
/// - 加载字体（失败时降级，不报错）
/// - 把 SVG 文本渲染为指定尺寸的 PNG 文件
/// - 不认识表格 / 圆形等具体图形
pub struct Rasterizer {
    options: usvg::Options<'static>,
    font_count: usize,
}

impl Rasterizer {
    /// 创建光栅化器
    ///
    /// 优先使用 `font_path`，其次是系统字体。两者都不可用时照常渲染，
    /// 文字坐标不依赖字体度量，只是字形不会出现在图片中。
    pub fn new(font_path: Option<&Path>) -> Self {
        let mut db = fontdb::Database::new();

        if let Some(path) = font_path {
            match db.load_font_file(path) {
                Ok(()) => info!("🔤 已加载字体: {}", path.display()),
                Err(e) => warn!("⚠️ 字体加载失败 ({}): {}，改用系统字体", path.display(), e),
            }
        }
        if db.len() == 0 {
            db.load_system_fonts();
        }

        let font_count = db.len();
        if font_count == 0 {
            warn!("⚠️ 未找到任何可用字体，图片中的文字将被省略");
        } else {
            // 通用字体族名指向第一个可用字体，避免因缺少 Arial 而丢字
            let family = db
                .faces()
                .next()
                .and_then(|face| face.families.first())
                .map(|(name, _)| name.clone());
            if let Some(family) = family {
                debug!("sans-serif 映射到字体: {}", family);
                db.set_sans_serif_family(family);
            }
        }

        let mut options = usvg::Options::default();
        options.fontdb = Arc::new(db);

        Self {
            options,
            font_count,
        }
    }

    /// 是否有可用字体
    pub fn has_fonts(&self) -> bool {
        self.font_count > 0
    }

    /// 把 SVG 渲染为 `width`x`height` 的 PNG 字节（白色背景）
    pub fn render(&self, svg: &str, width: u32, height: u32) -> AppResult<Vec<u8>> {
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(RenderError::CanvasTooLarge {
                width,
                height,
                max_side: MAX_CANVAS_SIDE,
            }
            .into());
        }

        let tree = usvg::Tree::from_str(svg, &self.options).map_err(|e| {
            RenderError::SvgParseFailed {
                source: Box::new(e),
            }
        })?;

        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::CanvasFailed { width, height })?;
        pixmap.fill(Color::WHITE);

        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );

        let png = pixmap.encode_png().map_err(|e| RenderError::EncodeFailed {
            source: Box::new(e),
        })?;
        Ok(png)
    }

    /// 渲染并写入文件（覆盖已存在的文件）
    pub fn render_to_file(&self, svg: &str, width: u32, height: u32, path: &Path) -> AppResult<()> {
        let png = self.render(svg, width, height)?;
        std::fs::write(path, png).map_err(|e| AppError::write_failed(path, e))?;
        debug!("写入图片 {} ({}x{})", path.display(), width, height);
        Ok(())
    }
}

/// 转义 SVG 文本节点中的特殊字符
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
