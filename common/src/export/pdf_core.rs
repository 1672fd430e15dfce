//! PDF export core utilities shared by CLI/WASM.
//!
//! テキストの折り返しとページ分割だけを行い、描画は各フロントエンドに任せる

use serde::{Deserialize, Serialize};

/// 1ptあたりのmm
const MM_PER_PT: f32 = 25.4 / 72.0;

/// テキストPDFのレイアウト（mm / pt）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPdfLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub title_font_size_pt: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
    /// 1行あたりの最大文字数（固定幅での折り返し）
    pub max_chars_per_line: usize,
}

impl Default for TextPdfLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl TextPdfLayout {
    /// A4縦、余白15mm、11pt
    pub fn a4() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 15.0,
            title_font_size_pt: 16.0,
            font_size_pt: 11.0,
            line_height_mm: 6.0,
            max_chars_per_line: 90,
        }
    }

    /// タイトル行が占める高さ（タイトル + 1行分の空き）
    pub fn title_block_mm(&self) -> f32 {
        self.title_font_size_pt * MM_PER_PT + self.line_height_mm * 2.0
    }

    /// 1ページ目（タイトルあり）に入る行数
    pub fn first_page_lines(&self) -> usize {
        self.lines_fitting(self.printable_height_mm() - self.title_block_mm())
    }

    /// 2ページ目以降に入る行数
    pub fn lines_per_page(&self) -> usize {
        self.lines_fitting(self.printable_height_mm())
    }

    /// 上端からの行のベースライン位置（PDF座標、下端基準のmm）
    pub fn line_y_mm(&self, index: usize, has_title: bool) -> f32 {
        let top = self.page_height_mm - self.margin_mm;
        let offset = if has_title { self.title_block_mm() } else { 0.0 };
        top - offset - self.line_height_mm * (index as f32 + 1.0)
    }

    fn printable_height_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm * 2.0
    }

    fn lines_fitting(&self, height_mm: f32) -> usize {
        if height_mm <= 0.0 || self.line_height_mm <= 0.0 {
            return 1;
        }
        ((height_mm / self.line_height_mm).floor() as usize).max(1)
    }

    /// 本文を折り返してページごとの行に分ける（1ページ目はタイトル分少ない）
    pub fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        let lines = wrap_text(text, self.max_chars_per_line);
        let mut pages = Vec::new();

        let first = self.first_page_lines().min(lines.len());
        pages.push(lines[..first].to_vec());

        for chunk in lines[first..].chunks(self.lines_per_page()) {
            pages.push(chunk.to_vec());
        }

        pages
    }
}

/// 単語単位で max_chars 文字以内に折り返す
///
/// 空行は段落区切りとして残す。max_chars を超える単語は強制的に分割する。
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut out = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            out.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            for piece in split_long_word(word, max_chars) {
                let piece_len = piece.chars().count();
                if line_len > 0 && line_len + 1 + piece_len > max_chars {
                    out.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                line.push_str(&piece);
                line_len += piece_len;
            }
        }

        if !line.is_empty() {
            out.push(line);
        }
    }

    out
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= max_chars {
        return vec![word.to_string()];
    }
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// PDFのファイル名に使えない文字を置き換える
pub fn pdf_file_name(base: &str) -> String {
    let stem = base
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(base);
    let sanitized: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "plant-analysis.pdf".to_string()
    } else {
        format!("{}-analysis.pdf", sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "The quick brown fox jumps over the lazy dog near the riverbank";
        let lines = wrap_text(text, 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 20), "{:?}", lines);
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_text_keeps_paragraph_breaks() {
        let lines = wrap_text("first paragraph\n\nsecond", 80);
        assert_eq!(lines, vec!["first paragraph", "", "second"]);
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("", 80).is_empty());
    }

    #[test]
    fn test_layout_positions_descend() {
        let layout = TextPdfLayout::a4();
        assert!(layout.line_y_mm(0, true) > layout.line_y_mm(1, true));
        assert!(layout.line_y_mm(0, false) > layout.line_y_mm(0, true));
        assert!(layout.line_y_mm(layout.lines_per_page() - 1, false) >= layout.margin_mm);
    }

    #[test]
    fn test_first_page_has_fewer_lines() {
        let layout = TextPdfLayout::a4();
        assert!(layout.first_page_lines() < layout.lines_per_page());
    }

    #[test]
    fn test_paginate_splits_pages() {
        let layout = TextPdfLayout::a4();
        let total = layout.first_page_lines() + layout.lines_per_page() + 3;
        let text = (0..total).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");

        let pages = layout.paginate(&text);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), layout.first_page_lines());
        assert_eq!(pages[1].len(), layout.lines_per_page());
        assert_eq!(pages[2].len(), 3);
        assert_eq!(pages[2][2], format!("line {}", total - 1));
    }

    #[test]
    fn test_paginate_empty_text_has_one_page() {
        let pages = TextPdfLayout::a4().paginate("");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(pdf_file_name("aloe vera.jpg"), "aloe_vera-analysis.pdf");
        assert_eq!(pdf_file_name("capture"), "capture-analysis.pdf");
        assert_eq!(pdf_file_name(""), "plant-analysis.pdf");
    }
}
