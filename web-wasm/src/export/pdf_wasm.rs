//! PDF生成（WASM版）
//!
//! 折り返しとページ分割は共通ライブラリで行い、描画はJavaScript Bridge経由でjsPDFに任せる

use crate::export::js_bindings::{download_text_pdf_js, options_to_json, pages_to_json, JsPdfOptions};
use plant_ai_common::export::pdf_core::pdf_file_name;
use plant_ai_common::TextPdfLayout;

/// 解析結果のテキストをPDFにしてダウンロードする
///
/// タイトルは元画像のファイル名。ファイル名が空なら既定名を使う
pub fn download_pdf(text: &str, source_file_name: &str) -> Result<(), String> {
    let layout = TextPdfLayout::a4();
    let pages = layout.paginate(text);

    let title = if source_file_name.is_empty() {
        "Plant AI"
    } else {
        source_file_name
    };
    let options = JsPdfOptions::new(&layout, title, &pdf_file_name(source_file_name));

    let pages_json = pages_to_json(&pages)?;
    let options_json = options_to_json(&options)?;

    download_text_pdf_js(&pages_json, &options_json)
        .map_err(|e| format!("PDF generation failed: {:?}", e))
}
