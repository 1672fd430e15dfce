//! JavaScript Bridge バインディング
//!
//! PDFの描画とダウンロードをJavaScript側（jsPDF）に委譲する。
//! ページ分割はRust側で済ませ、JSは受け取った行を置くだけ。

use plant_ai_common::TextPdfLayout;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================
// データ型定義
// ============================================

/// JavaScript側に渡すレイアウトとタイトル
///
/// jsPDFは上端基準の座標なので、Y座標はすべて上端からのmmで渡す
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsPdfOptions {
    pub title: String,
    pub file_name: String,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub title_font_size_pt: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
    /// 1ページ目の先頭行のベースライン
    pub first_page_top_mm: f32,
    /// 2ページ目以降の先頭行のベースライン
    pub page_top_mm: f32,
}

impl JsPdfOptions {
    pub fn new(layout: &TextPdfLayout, title: &str, file_name: &str) -> Self {
        Self {
            title: title.to_string(),
            file_name: file_name.to_string(),
            page_width_mm: layout.page_width_mm,
            page_height_mm: layout.page_height_mm,
            margin_mm: layout.margin_mm,
            title_font_size_pt: layout.title_font_size_pt,
            font_size_pt: layout.font_size_pt,
            line_height_mm: layout.line_height_mm,
            first_page_top_mm: layout.page_height_mm - layout.line_y_mm(0, true),
            page_top_mm: layout.page_height_mm - layout.line_y_mm(0, false),
        }
    }
}

// ============================================
// JavaScript関数のextern宣言
// ============================================

#[wasm_bindgen(module = "/js/pdf-export.js")]
extern "C" {
    /// ページごとの行を描画してダウンロードする
    ///
    /// # Arguments
    /// * `pages_json` - 行配列の配列（JSON文字列）
    /// * `options_json` - JsPdfOptionsのJSON文字列
    #[wasm_bindgen(js_name = "downloadTextPdf", catch)]
    pub fn download_text_pdf_js(pages_json: &str, options_json: &str) -> Result<(), JsValue>;
}

// ============================================
// ヘルパー関数
// ============================================

/// ページ配列をJSON文字列に変換
pub fn pages_to_json(pages: &[Vec<String>]) -> Result<String, String> {
    serde_json::to_string(pages).map_err(|e| format!("JSON serialization failed: {}", e))
}

/// オプションをJSON文字列に変換
pub fn options_to_json(options: &JsPdfOptions) -> Result<String, String> {
    serde_json::to_string(options).map_err(|e| format!("JSON serialization failed: {}", e))
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_paginated_pages_serialize_for_bridge() {
        let layout = TextPdfLayout::a4();
        let text = "Aloe vera stores water in its leaves. ".repeat(200);
        let pages = layout.paginate(&text);
        assert!(pages.len() > 1);

        let json = pages_to_json(&pages).expect("JSON変換失敗");
        let parsed: Vec<Vec<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pages);
    }
}
