//! PDF出力の統合テスト

use plant_ai::export::{self, pdf};
use plant_ai_common::{AnalysisRecord, ExtractedFields, TextPdfLayout};
use tempfile::tempdir;

fn create_test_record() -> AnalysisRecord {
    AnalysisRecord {
        file_name: "aloe.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        variant: "care-sheet".to_string(),
        raw_text: "**NAME:** Aloe Vera\n**SPECIES:** Aloe barbadensis\n\nA succulent.".to_string(),
        clean_text: "NAME: Aloe Vera\nSPECIES: Aloe barbadensis\n\nA succulent.".to_string(),
        fields: ExtractedFields {
            properties: vec!["NAME: Aloe Vera".to_string(), "SPECIES: Aloe barbadensis".to_string()],
            ..Default::default()
        },
        analyzed_at: "2026-10-19 10:00:00".to_string(),
    }
}

#[test]
fn test_pdf_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("aloe.pdf");

    let record = create_test_record();
    let result = pdf::generate_pdf(&record.raw_text, "Aloe", &output_path, &TextPdfLayout::a4());

    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "PDFファイルが作成されていない");

    let metadata = std::fs::metadata(&output_path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "PDFファイルが空");
}

#[test]
fn test_pdf_generation_multi_page() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("long.pdf");

    let long_text = (0..200)
        .map(|i| format!("Paragraph {} about watering, light and soil for a healthy plant.", i))
        .collect::<Vec<_>>()
        .join("\n");

    let result = pdf::generate_pdf(&long_text, "Long", &output_path, &TextPdfLayout::a4());
    assert!(result.is_ok(), "PDF生成に失敗: {:?}", result.err());

    let single = pdf::render_pdf("one line", "Short", &TextPdfLayout::a4()).unwrap();
    let multi = std::fs::read(&output_path).unwrap();
    assert!(multi.len() > single.len());
}

#[test]
fn test_export_record_into_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let record = create_test_record();

    let path = export::export_record(&record, dir.path(), "Aloe", true).unwrap();
    assert_eq!(path, dir.path().join("aloe-analysis.pdf"));
    assert!(path.exists());
}

#[test]
fn test_record_json_roundtrip_for_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("result.json");

    let record = create_test_record();
    std::fs::write(&json_path, serde_json::to_string_pretty(&record).unwrap()).unwrap();

    let content = std::fs::read_to_string(&json_path).unwrap();
    let loaded: AnalysisRecord = serde_json::from_str(&content).unwrap();
    assert_eq!(export::export_text(&loaded, true), record.clean_text);
    assert_eq!(export::export_text(&loaded, false), record.raw_text);
}
