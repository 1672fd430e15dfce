use crate::error::{PlantAiError, Result};
use plant_ai_common::TextPdfLayout;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// テキストを折り返してPDFに描画し、バイト列を返す
///
/// 組み込みフォント（Helvetica）を使うため、ラテン文字以外は正しく表示されない
pub fn render_pdf(text: &str, title: &str, layout: &TextPdfLayout) -> Result<Vec<u8>> {
    let doc = build_document(text, title, layout)?;
    doc.save_to_bytes()
        .map_err(|e| PlantAiError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))
}

/// テキストをPDFファイルに出力する
pub fn generate_pdf(text: &str, title: &str, output_path: &Path, layout: &TextPdfLayout) -> Result<()> {
    let doc = build_document(text, title, layout)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| PlantAiError::PdfGeneration(format!("PDF保存エラー: {:?}", e)))?;

    Ok(())
}

fn build_document(text: &str, title: &str, layout: &TextPdfLayout) -> Result<PdfDocumentReference> {
    let width = Mm(layout.page_width_mm);
    let height = Mm(layout.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PlantAiError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PlantAiError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;

    let pages = layout.paginate(text);
    let x = Mm(layout.margin_mm);

    for (page_index, lines) in pages.iter().enumerate() {
        let (page, layer) = if page_index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, "Layer 1")
        };
        let current_layer = doc.get_page(page).get_layer(layer);

        let has_title = page_index == 0 && !title.is_empty();
        if has_title {
            let title_y = layout.page_height_mm - layout.margin_mm - layout.line_height_mm;
            current_layer.use_text(title, layout.title_font_size_pt, x, Mm(title_y), &title_font);
        }

        for (line_index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = layout.line_y_mm(line_index, has_title);
            current_layer.use_text(line.as_str(), layout.font_size_pt, x, Mm(y), &font);
        }
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let bytes = render_pdf("NAME: Aloe Vera", "Aloe", &TextPdfLayout::a4()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_pdf_empty_text() {
        let bytes = render_pdf("", "", &TextPdfLayout::a4()).unwrap();
        assert!(!bytes.is_empty());
    }
}
