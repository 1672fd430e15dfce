//! 解析パイプライン
//!
//! プロンプトと抽出処理の組み合わせ。バリアントごとのプリセットを持つ。

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::postprocess::{extract_keywords, extract_properties, extract_questions, normalize};
use crate::prompts::{build_questions_prompt, CARE_SHEET_PROMPT, EXPLORER_PROMPT, OVERVIEW_PROMPT};
use crate::types::{ExtractedFields, GenerationRequest};

/// プロンプトのバリアント
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// 一般的な説明 + キーワード
    #[default]
    Overview,
    /// "KEY: value" 形式のケアシート + プロパティ
    CareSheet,
    /// 説明 + 末尾の関連質問
    Explorer,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Overview => "overview",
            Variant::CareSheet => "care-sheet",
            Variant::Explorer => "explorer",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Variant::Overview => OVERVIEW_PROMPT,
            Variant::CareSheet => CARE_SHEET_PROMPT,
            Variant::Explorer => EXPLORER_PROMPT,
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overview" => Ok(Variant::Overview),
            "care-sheet" | "caresheet" | "care" => Ok(Variant::CareSheet),
            "explorer" => Ok(Variant::Explorer),
            _ => Err(Error::Parse(format!("Unknown variant: {}", s))),
        }
    }
}

/// 関連質問の取得方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionSource {
    #[default]
    None,
    /// 応答中の "Related Questions:" を探す
    Marker,
    /// 結果をもとに2回目のAI呼び出しを行う
    FollowUpCall,
}

impl std::str::FromStr for QuestionSource {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(QuestionSource::None),
            "marker" => Ok(QuestionSource::Marker),
            "follow-up" | "followup" | "call" => Ok(QuestionSource::FollowUpCall),
            _ => Err(Error::Parse(format!("Unknown question source: {}", s))),
        }
    }
}

/// 応答テキストに適用する抽出処理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Extractor {
    Properties,
    Keywords,
}

/// プロンプト + 抽出処理のセット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub variant: Variant,
    pub prompt: String,
    pub extractors: Vec<Extractor>,
    pub question_source: QuestionSource,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::preset(Variant::default())
    }
}

impl Pipeline {
    /// バリアントごとの既定構成
    pub fn preset(variant: Variant) -> Self {
        let (extractors, question_source) = match variant {
            Variant::Overview => (vec![Extractor::Keywords], QuestionSource::None),
            Variant::CareSheet => (vec![Extractor::Properties], QuestionSource::None),
            Variant::Explorer => (vec![Extractor::Keywords], QuestionSource::Marker),
        };

        Self {
            variant,
            prompt: variant.prompt().to_string(),
            extractors,
            question_source,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_question_source(mut self, source: QuestionSource) -> Self {
        self.question_source = source;
        self
    }

    /// 2回目のAI呼び出しが必要か
    pub fn needs_question_call(&self) -> bool {
        self.question_source == QuestionSource::FollowUpCall
    }

    /// 生の応答テキストからフィールドを抽出する（normalize後のテキストに適用）
    pub fn process(&self, raw: &str) -> ExtractedFields {
        let clean = normalize(raw);
        let mut fields = ExtractedFields::default();

        for extractor in &self.extractors {
            match extractor {
                Extractor::Properties => fields.properties = extract_properties(&clean),
                Extractor::Keywords => fields.keywords = extract_keywords(&clean),
            }
        }

        if self.question_source == QuestionSource::Marker {
            fields.questions = extract_questions(&clean);
        }

        fields
    }

    /// 関連質問を得るための2回目のリクエスト（画像なし）
    pub fn questions_request(&self, result: &str) -> Option<GenerationRequest> {
        self.needs_question_call()
            .then(|| GenerationRequest::text(build_questions_prompt(&normalize(result))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_str() {
        assert_eq!("overview".parse::<Variant>().unwrap(), Variant::Overview);
        assert_eq!("Care-Sheet".parse::<Variant>().unwrap(), Variant::CareSheet);
        assert_eq!("explorer".parse::<Variant>().unwrap(), Variant::Explorer);
        assert!(matches!("unknown".parse::<Variant>(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_variant_serde_kebab_case() {
        let json = serde_json::to_string(&Variant::CareSheet).unwrap();
        assert_eq!(json, "\"care-sheet\"");
        let variant: Variant = serde_json::from_str("\"explorer\"").unwrap();
        assert_eq!(variant, Variant::Explorer);
    }

    #[test]
    fn test_question_source_from_str() {
        assert_eq!("marker".parse::<QuestionSource>().unwrap(), QuestionSource::Marker);
        assert_eq!("follow-up".parse::<QuestionSource>().unwrap(), QuestionSource::FollowUpCall);
        assert!(matches!("sometimes".parse::<QuestionSource>(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_preset_care_sheet_extracts_properties() {
        let pipeline = Pipeline::preset(Variant::CareSheet);
        let raw = "**NAME:** Aloe Vera\n**SPECIES:** Aloe barbadensis\n\nA hardy succulent from Arabia.";
        let fields = pipeline.process(raw);

        assert_eq!(fields.properties, vec!["NAME: Aloe Vera", "SPECIES: Aloe barbadensis"]);
        assert!(fields.keywords.is_empty());
        assert!(fields.questions.is_empty());
    }

    #[test]
    fn test_preset_overview_extracts_keywords() {
        let fields = Pipeline::preset(Variant::Overview).process("## Monstera deliciosa\nA tropical climber.");
        assert_eq!(fields.keywords, vec!["Monstera", "deliciosa", "tropical", "climber"]);
        assert!(fields.properties.is_empty());
    }

    #[test]
    fn test_preset_explorer_extracts_marker_questions() {
        let raw = "A fern.\n\n**Related Questions:**\n- How humid should it be?\n- Can it live outdoors?";
        let fields = Pipeline::preset(Variant::Explorer).process(raw);
        assert_eq!(fields.questions, vec!["How humid should it be?", "Can it live outdoors?"]);
    }

    #[test]
    fn test_process_nothing_found_yields_empty() {
        let pipeline = Pipeline::preset(Variant::CareSheet);
        assert!(pipeline.process("").is_empty());
    }

    #[test]
    fn test_questions_request_only_for_follow_up_call() {
        let pipeline = Pipeline::preset(Variant::Overview);
        assert!(pipeline.questions_request("text").is_none());

        let pipeline = pipeline.with_question_source(QuestionSource::FollowUpCall);
        let request = pipeline.questions_request("**Aloe** is a succulent").unwrap();
        assert!(request.image.is_none());
        assert!(request.prompt.contains("Aloe is a succulent"));
    }

    #[test]
    fn test_with_prompt_overrides_template() {
        let pipeline = Pipeline::preset(Variant::Overview).with_prompt("custom");
        assert_eq!(pipeline.prompt, "custom");
        assert_eq!(pipeline.variant, Variant::Overview);
    }
}
