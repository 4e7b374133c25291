//! 内置题目
//!
//! 文档和 QUESTIONS.md 都从这里的 `Assessment` 渲染

use super::question::{AnswerOption, Assessment, Difficulty, Figure, Question};

/// 返回内置的测评内容
pub fn builtin_assessment() -> Assessment {
    Assessment {
        title: "Central Middle — Derived Assessment".to_string(),
        description:
            "Two generated quantitative math questions similar to the base examples.".to_string(),
        questions: vec![uniform_question(), package_question()],
    }
}

fn uniform_question() -> Question {
    Question {
        prompt: "Each student at Riverside Prep chooses a uniform consisting of 1 shirt, \
                 1 pair of pants, and 1 hat. The table shows the available options for each \
                 item. How many different complete uniforms are possible?"
            .to_string(),
        instruction: "Select the number of possible uniform combinations from the options."
            .to_string(),
        difficulty: Difficulty::Easy,
        order: 1,
        options: [
            AnswerOption::wrong("18"),
            AnswerOption::wrong("24"),
            AnswerOption::right("36"),
            AnswerOption::wrong("48"),
            AnswerOption::wrong("72"),
        ],
        explanation: "There are 4 shirt choices, 3 pants choices, and 3 hat choices. \
                      Total combinations = 4 × 3 × 3 = 36."
            .to_string(),
        subject: "Quantitative Math".to_string(),
        unit: "Numbers and Operations".to_string(),
        topic: "Combinations / Counting".to_string(),
        plus_marks: 1,
        figure: Figure::OptionsTable,
    }
}

fn package_question() -> Question {
    Question {
        prompt: "The top view of a rectangular box containing 8 identical tightly packed \
                 spherical balls arranged in two rows of four is shown. If each ball has \
                 radius $2$ cm, which of the following is closest to the dimensions \
                 (height × width × length), in centimeters, of the rectangular package?"
            .to_string(),
        instruction: "Choose the correct dimensions from the options.".to_string(),
        difficulty: Difficulty::Moderate,
        order: 2,
        options: [
            AnswerOption::wrong(r"$4 \times 8 \times 16$"),
            AnswerOption::wrong(r"$2 \times 8 \times 16$"),
            AnswerOption::right(r"$4 \times 12 \times 18$"),
            AnswerOption::wrong(r"$6 \times 8 \times 16$"),
            AnswerOption::wrong(r"$8 \times 12 \times 24$"),
        ],
        explanation: concat!(
            "Top view shows two rows and four columns of circles (diameter = 4 cm). ",
            "Width (short side) = 2 rows × 4 cm = 8 cm. ",
            "Length = 4 columns × 4 cm = 16 cm. ",
            "Height must accommodate one layer of balls: diameter = 4 cm. ",
            r"So dimensions: $4 \times 8 \times 16$."
        )
        .to_string(),
        subject: "Quantitative Math".to_string(),
        unit: "Geometry and Measurement".to_string(),
        topic: "Solid Figures / Coordinate Geometry".to_string(),
        plus_marks: 1,
        figure: Figure::PackedCircles,
    }
}
