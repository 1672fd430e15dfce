//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有されるプロンプト:
//! - OVERVIEW_PROMPT / CARE_SHEET_PROMPT / EXPLORER_PROMPT: 画像解析用
//! - build_questions_prompt: 関連質問を別呼び出しで得るためのプロンプト
//! - build_follow_up_prompt: 関連質問をたずねて結果を再生成するプロンプト

/// 一般的な説明（キーワード抽出向け）
pub const OVERVIEW_PROMPT: &str = "Identify the plant in this photo. Describe its common name, \
scientific name, family, native habitat, distinguishing features and basic care needs. \
Answer in a few short paragraphs.";

/// "KEY: value" 行を要求する（プロパティ抽出向け）
pub const CARE_SHEET_PROMPT: &str = r#"Identify the plant in this photo and answer with a care sheet.
Start with one line per property in exactly this form:
NAME: <common name>
SPECIES: <scientific name>
FAMILY: <botanical family>
LIGHT: <light requirements>
WATER: <watering needs>
Then write a short paragraph about the plant. If no plant is visible, say so."#;

/// 末尾に関連質問のリストを要求する（質問抽出向け）
pub const EXPLORER_PROMPT: &str = r#"Identify the plant in this photo and describe it: name, appearance, growing conditions and any toxicity to people or pets.
Finish your answer with a section that starts with the line "Related Questions:" followed by three follow-up questions a gardener might ask, one per line."#;

/// 2回目の呼び出しで返してほしい質問数
pub const QUESTION_COUNT: usize = 3;

/// 解析結果から関連質問リストを作らせるプロンプト（テキストのみ）
pub fn build_questions_prompt(result: &str) -> String {
    format!(
        r#"Here is a description of a plant:

{result}

Write {QUESTION_COUNT} short follow-up questions a curious gardener might ask about this plant.
Output only the questions, one per line, with no numbering and no other text."#
    )
}

/// 関連質問をたずねるプロンプト（画像も一緒に送る）
pub fn build_follow_up_prompt(question: &str) -> String {
    format!(
        "Looking at the plant in this photo, answer the following question in a short, \
practical paragraph.\n\nQuestion: {}",
        question.trim()
    )
}
