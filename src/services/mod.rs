//! 业务能力层（Services）
//!
//! 每个模块对应流水线中的一个步骤，只描述"我能做什么"，不关心执行顺序

pub mod circle_image;
pub mod document_composer;
pub mod package_assembler;
pub mod publisher;
pub mod table_image;

pub use circle_image::{render_packed_circles, CircleGrid};
pub use document_composer::{DocumentComposer, FigurePaths};
pub use package_assembler::{PackageAssembler, PackageOutput};
pub use publisher::{PublishReport, PublishStage, Publisher};
pub use table_image::render_options_table;
