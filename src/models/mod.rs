pub mod bank;
pub mod question;
pub mod tagged;

pub use bank::builtin_assessment;
pub use question::{AnswerOption, Assessment, Difficulty, Figure, Question, OPTION_COUNT};
pub use tagged::{render_markdown, Tag, TaggedLine};
