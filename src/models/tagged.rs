//! 标记行格式（`@tag text`）
//!
//! 下游题目导入工具按行识别标记，标记大小写必须与这里完全一致。
//! 正确选项用 `@@option`，其余选项用 `@option`。

use std::fmt;

use super::question::{Assessment, Question};

/// 行首标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Title,
    Description,
    Question,
    Instruction,
    Difficulty,
    Order,
    Option,
    CorrectOption,
    Explanation,
    Subject,
    Unit,
    Topic,
    PlusMarks,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Title => "@title",
            Tag::Description => "@description",
            Tag::Question => "@question",
            Tag::Instruction => "@instruction",
            Tag::Difficulty => "@difficulty",
            Tag::Order => "@Order",
            Tag::Option => "@option",
            Tag::CorrectOption => "@@option",
            Tag::Explanation => "@explanation",
            Tag::Subject => "@subject",
            Tag::Unit => "@unit",
            Tag::Topic => "@topic",
            Tag::PlusMarks => "@plusmarks",
        }
    }
}

/// 一行输出；`tag` 为空表示续行（例如解析正文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine {
    pub tag: Option<Tag>,
    pub text: String,
}

impl TaggedLine {
    fn tagged(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            tag: Some(tag),
            text: text.into(),
        }
    }

    fn plain(text: impl Into<String>) -> Self {
        Self {
            tag: None,
            text: text.into(),
        }
    }
}

impl fmt::Display for TaggedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{} {}", tag.as_str(), self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// 测评头部：`@title` 和 `@description`
pub fn header_lines(assessment: &Assessment) -> Vec<TaggedLine> {
    vec![
        TaggedLine::tagged(Tag::Title, &assessment.title),
        TaggedLine::tagged(Tag::Description, &assessment.description),
    ]
}

/// 一道题的全部标记行
pub fn question_lines(question: &Question) -> Vec<TaggedLine> {
    let mut lines = vec![
        TaggedLine::tagged(Tag::Question, &question.prompt),
        TaggedLine::tagged(Tag::Instruction, &question.instruction),
        TaggedLine::tagged(Tag::Difficulty, question.difficulty.as_str()),
        TaggedLine::tagged(Tag::Order, question.order.to_string()),
    ];

    for (i, option) in question.options.iter().enumerate() {
        let tag = if option.correct {
            Tag::CorrectOption
        } else {
            Tag::Option
        };
        lines.push(TaggedLine::tagged(
            tag,
            format!("({}) {}", Question::option_label(i), option.text),
        ));
    }

    // @explanation 行本身留空，正文单独成行
    lines.push(TaggedLine::tagged(Tag::Explanation, ""));
    lines.push(TaggedLine::plain(&question.explanation));
    lines.push(TaggedLine::tagged(Tag::Subject, &question.subject));
    lines.push(TaggedLine::tagged(Tag::Unit, &question.unit));
    lines.push(TaggedLine::tagged(Tag::Topic, &question.topic));
    lines.push(TaggedLine::tagged(
        Tag::PlusMarks,
        question.plus_marks.to_string(),
    ));
    lines
}

/// 渲染 QUESTIONS.md
pub fn render_markdown(assessment: &Assessment) -> String {
    let mut out = String::new();
    for line in header_lines(assessment) {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out.push('\n');

    let blocks: Vec<String> = assessment
        .questions
        .iter()
        .map(|q| {
            let mut block = format!("// Question {}\n", q.order);
            for line in question_lines(q) {
                block.push_str(&line.to_string());
                block.push('\n');
            }
            block
        })
        .collect();
    out.push_str(&blocks.join("\n"));
    out
}
