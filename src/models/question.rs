use std::fmt;

/// 每道选择题固定的选项数量
pub const OPTION_COUNT: usize = 5;

/// 题目难度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    /// 标记行中使用的文本
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 题目配图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Figure {
    /// 校服选项表格
    OptionsTable,
    /// 包装盒俯视图（密排圆）
    PackedCircles,
}

impl Figure {
    pub const ALL: [Figure; 2] = [Figure::OptionsTable, Figure::PackedCircles];

    /// 图片文件名
    pub fn file_name(self) -> &'static str {
        match self {
            Figure::OptionsTable => "uniform_table.png",
            Figure::PackedCircles => "rect_package_topview_8.png",
        }
    }
}

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String,
    pub correct: bool,
}

impl AnswerOption {
    pub fn wrong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: false,
        }
    }

    pub fn right(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: true,
        }
    }
}

/// 选择题
#[derive(Debug, Clone)]
pub struct Question {
    pub prompt: String,
    pub instruction: String,
    pub difficulty: Difficulty,
    /// 题目序号（从1开始）
    pub order: u32,
    pub options: [AnswerOption; OPTION_COUNT],
    pub explanation: String,
    pub subject: String,
    pub unit: String,
    pub topic: String,
    pub plus_marks: u32,
    pub figure: Figure,
}

impl Question {
    /// 选项标签 (A)..(E)
    pub fn option_label(index: usize) -> char {
        (b'A' + index as u8) as char
    }

    /// 正确选项数量
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.correct).count()
    }

    /// 正确选项的下标
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.correct)
    }
}

/// 一份测评：标题、描述和有序题目列表
#[derive(Debug, Clone)]
pub struct Assessment {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Assessment {
    /// 测评中用到的所有配图（按出现顺序去重）
    pub fn figures(&self) -> Vec<Figure> {
        let mut figures = Vec::new();
        for q in &self.questions {
            if !figures.contains(&q.figure) {
                figures.push(q.figure);
            }
        }
        figures
    }
}
