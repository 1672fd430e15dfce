pub mod pdf;

use plant_ai_common::{normalize, AnalysisRecord, TextPdfLayout};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// PDFに載せるテキストを選ぶ（生テキスト or normalize済み）
pub fn export_text(record: &AnalysisRecord, normalized: bool) -> String {
    if !normalized {
        return record.raw_text.clone();
    }
    if record.clean_text.is_empty() {
        normalize(&record.raw_text)
    } else {
        record.clean_text.clone()
    }
}

/// 出力先が既存のフォルダならファイル名を補う。拡張子がなければ .pdf を付ける
pub fn pdf_output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(plant_ai_common::export::pdf_core::pdf_file_name(file_name))
    } else if output.extension().is_none() {
        output.with_extension("pdf")
    } else {
        output.to_path_buf()
    }
}

/// 解析レコードをPDFに出力する
pub fn export_record(record: &AnalysisRecord, output: &Path, title: &str, normalized: bool) -> Result<PathBuf> {
    let output_path = pdf_output_path(output, &record.file_name);
    println!("- PDFを生成中...");
    pdf::generate_pdf(&export_text(record, normalized), title, &output_path, &TextPdfLayout::a4())?;
    println!("✔ PDF出力: {}", output_path.display());
    Ok(output_path)
}
