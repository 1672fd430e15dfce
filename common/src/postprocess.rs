//! AI応答の後処理
//!
//! Geminiが返す自由文テキストを整形し、UIで使うフィールドを抜き出す:
//! - normalize: Markdown装飾（コードフェンス、強調、見出し、箇条書き記号）の除去
//! - extract_properties: "KEY: value" 形式の行
//! - extract_keywords: 5文字以上の単語（ストップワード除外）
//! - extract_questions: "Related Questions:" 以降の質問行
//!
//! いずれも自然文に対するベストエフォートのヒューリスティックで、
//! 応答の書式が変われば取りこぼす。

use regex::Regex;
use serde::{Deserialize, Serialize};

/// extract_properties が返す最大件数
pub const PROPERTY_LIMIT: usize = 5;

/// extract_keywords が返す最大件数
pub const KEYWORD_LIMIT: usize = 5;

/// キーワードとして採用する最小文字数（4文字より長い）
const KEYWORD_MIN_CHARS: usize = 5;

/// キーワードから除外する語（小文字で比較）
pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "along", "also", "among", "another",
    "appears", "around", "because", "been", "before", "being", "below", "between", "both",
    "commonly", "could", "does", "doing", "during", "each", "either", "every", "found",
    "from", "further", "generally", "have", "having", "here", "however", "image", "into",
    "known", "looks", "might", "more", "most", "much", "often", "other", "others", "over",
    "photo", "picture", "plant", "plants", "quite", "rather", "really", "same", "should",
    "shows", "since", "some", "such", "than", "that", "their", "theirs", "them", "then",
    "there", "these", "they", "this", "those", "through", "typically", "under", "until",
    "usually", "very", "were", "what", "when", "where", "whether", "which", "while", "with",
    "within", "without", "would", "your", "yours",
];

const BULLET_MARKERS: &[char] = &['-', '*', '+', '•'];

lazy_static::lazy_static! {
    static ref QUESTION_MARKER_RE: Regex = Regex::new(r"(?i)related\s+questions?\s*:").unwrap();
    static ref NUMBERED_PREFIX_RE: Regex = Regex::new(r"^\(?\d{1,3}[.)]\s+").unwrap();
}

/// 表示用の行種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    Heading,
    ListItem,
    Plain,
}

/// 分類済みの1行（textは装飾除去済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

/// Markdown装飾を除去して整形する
///
/// - コードフェンス行を削除し、残ったバッククォートも除去
/// - 強調記号（`*`, `__`）を除去
/// - 行頭の見出し記号（`#`）と箇条書き記号（`-`, `*`, `+`, `•`）を除去
///   （番号付きリストの番号は残す）
/// - 行末の空白を除去し、連続する空行を1行にまとめる
///
/// 冪等: `normalize(&normalize(x)) == normalize(x)`
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out: Vec<String> = Vec::new();
    let mut previous_blank = true; // 先頭の空行を捨てる

    for raw in text.lines() {
        if is_code_fence(raw) {
            continue;
        }

        let line = clean_line(raw);
        if line.is_empty() {
            if !previous_blank {
                out.push(String::new());
            }
            previous_blank = true;
        } else {
            out.push(line);
            previous_blank = false;
        }
    }

    if out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    out.join("\n")
}

/// コロンを含む行を先頭から最大 PROPERTY_LIMIT 件返す
///
/// 順序は元テキストのまま、重複除去はしない
pub fn extract_properties(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.contains(':'))
        .take(PROPERTY_LIMIT)
        .map(str::to_string)
        .collect()
}

/// プロパティ行を最初のコロンで (キー, 値) に分割する
pub fn split_property(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// 空白区切りで単語を取り出し、キーワード候補を最大 KEYWORD_LIMIT 件返す
///
/// 前後の記号は取り除いてから長さを判定する。ストップワード判定と
/// 重複判定は大文字小文字を区別しない（最初に現れた表記を採用）。
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for token in text.split_whitespace() {
        let word = token.trim_matches(|c: char| !c.is_alphanumeric());
        if word.chars().count() < KEYWORD_MIN_CHARS {
            continue;
        }

        let lower = word.to_lowercase();
        if is_stop_word(&lower) {
            continue;
        }
        if keywords.iter().any(|k| k.to_lowercase() == lower) {
            continue;
        }

        keywords.push(word.to_string());
        if keywords.len() == KEYWORD_LIMIT {
            break;
        }
    }

    keywords
}

/// ストップワードか判定（大文字小文字を区別しない）
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

/// "Related Questions:" マーカー以降の質問行を返す
///
/// マーカーと同じ行に続く文も1件目として扱う。質問が始まった後の
/// 最初の空行で打ち切る。マーカーがなければ空。
pub fn extract_questions(text: &str) -> Vec<String> {
    let Some(marker) = QUESTION_MARKER_RE.find(text) else {
        return Vec::new();
    };

    let mut questions = Vec::new();
    let mut lines = text[marker.end()..].lines();

    if let Some(rest) = lines.next() {
        let question = clean_list_entry(rest);
        if !question.is_empty() {
            questions.push(question);
        }
    }

    for line in lines {
        if line.trim().is_empty() {
            if questions.is_empty() {
                continue;
            }
            break;
        }
        let question = clean_list_entry(line);
        if !question.is_empty() {
            questions.push(question);
        }
    }

    questions
}

/// 本文と "Related Questions:" セクションを分ける
///
/// 戻り値の本文はマーカー行の手前まで。マーカーがなければ全文。
pub fn split_question_section(text: &str) -> (&str, Vec<String>) {
    let Some(marker) = QUESTION_MARKER_RE.find(text) else {
        return (text, Vec::new());
    };

    let line_start = text[..marker.start()].rfind('\n').map_or(0, |i| i + 1);
    (text[..line_start].trim_end(), extract_questions(text))
}

/// 2回目のAI呼び出しが返した「1行1質問」のリストをパースする
///
/// "?" で終わる行が1つでもあれば、前置きの行を除くためそれだけを採用する
pub fn parse_question_list(text: &str) -> Vec<String> {
    let entries: Vec<String> = text
        .lines()
        .filter(|line| !is_code_fence(line))
        .map(clean_list_entry)
        .filter(|entry| !entry.is_empty())
        .collect();

    if entries.iter().any(|e| e.ends_with('?')) {
        entries.into_iter().filter(|e| e.ends_with('?')).collect()
    } else {
        entries
    }
}

/// 生テキストを行ごとに分類する（空行とコードフェンス行は除く）
pub fn parse_lines(text: &str) -> Vec<Line> {
    text.lines()
        .filter(|raw| !raw.trim().is_empty() && !is_code_fence(raw))
        .filter_map(|raw| {
            let kind = classify_line(raw);
            let text = match kind {
                LineKind::ListItem => clean_list_entry(raw),
                _ => clean_line(raw).trim_start().to_string(),
            };
            (!text.is_empty()).then_some(Line { kind, text })
        })
        .collect()
}

/// 1行の種別を判定する
pub fn classify_line(raw: &str) -> LineKind {
    let trimmed = raw.trim();

    if strip_heading_marker(trimmed).is_some() {
        return LineKind::Heading;
    }
    // 行全体が太字なら見出し扱い（"**Care:**" など）
    if trimmed.len() > 4 && trimmed.starts_with("**") && trimmed.ends_with("**") {
        return LineKind::Heading;
    }
    if strip_bullet_marker(trimmed).is_some() || NUMBERED_PREFIX_RE.is_match(trimmed) {
        return LineKind::ListItem;
    }
    LineKind::Plain
}

/// 1行の装飾を変化がなくなるまで除去する
fn clean_line(line: &str) -> String {
    let mut current = line.trim_end().to_string();
    loop {
        let stripped = strip_leading_markers(&current);
        let next = strip_inline_markers(&stripped).trim_end().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// 箇条書きの記号と番号を除いた本文
fn clean_list_entry(line: &str) -> String {
    let cleaned = clean_line(line);
    let trimmed = cleaned.trim();
    NUMBERED_PREFIX_RE.replace(trimmed, "").trim().to_string()
}

/// 行頭の見出し記号・箇条書き記号を取り除く（記号がなければインデントも含めそのまま）
fn strip_leading_markers(line: &str) -> String {
    let mut rest = line;
    let mut stripped = false;

    loop {
        let trimmed = rest.trim_start();
        match strip_heading_marker(trimmed).or_else(|| strip_bullet_marker(trimmed)) {
            Some(after) => {
                rest = after;
                stripped = true;
            }
            None => break,
        }
    }

    if stripped {
        rest.trim_start().to_string()
    } else {
        line.to_string()
    }
}

fn strip_inline_markers(line: &str) -> String {
    line.replace('`', "").replace('*', "").replace("__", "")
}

/// "# " 〜 "###### " の見出し記号（記号だけの行も含む）
fn strip_heading_marker(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        _ => None,
    }
}

/// "- " "* " "+ " "• " の箇条書き記号
fn strip_bullet_marker(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if !BULLET_MARKERS.contains(&first) {
        return None;
    }
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(&line[first.len_utf8()..]),
        _ => None,
    }
}

/// ``` または ```json のようなコードフェンス行
fn is_code_fence(line: &str) -> bool {
    let trimmed = line.trim();
    match trimmed.strip_prefix("```") {
        Some(tag) => tag
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '+' | '_' | '`')),
        None => false,
    }
}
