//! 解析セッション
//!
//! 1つの画面（またはCLI実行）が持つ状態: 選択中の画像、最新の解析結果、
//! 抽出フィールド、読み込み中フラグ。
//!
//! 通信はしない。`begin_*` がリクエストを返し、呼び出し側が送信して
//! 結果を `complete*` に渡す。Leptosのシグナルからもasync関数からも同じ
//! 状態遷移を使うため。

use async_trait::async_trait;

use crate::error::Result;
use crate::pipeline::{Pipeline, QuestionSource};
use crate::postprocess::{normalize, parse_lines, parse_question_list, split_question_section, Line};
use crate::prompts::build_follow_up_prompt;
use crate::types::{ExtractedFields, GenerationRequest, ImageData};

/// テキスト生成サービス（Gemini等）
#[async_trait(?Send)]
pub trait TextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pipeline: Pipeline,
    image: Option<ImageData>,
    result: Option<String>,
    fields: ExtractedFields,
    loading: bool,
}

impl Session {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            ..Default::default()
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    /// 最新の解析結果（生テキスト）
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// 最新の解析結果（normalize済み）
    pub fn clean_result(&self) -> Option<String> {
        self.result.as_deref().map(normalize)
    }

    /// 表示用に分類した行
    ///
    /// マーカー方式では "Related Questions:" 以降を除く（質問はボタンで出すため）
    pub fn display_lines(&self) -> Vec<Line> {
        let Some(result) = self.result.as_deref() else {
            return Vec::new();
        };
        let body = match self.pipeline.question_source {
            QuestionSource::Marker => split_question_section(result).0,
            _ => result,
        };
        parse_lines(body)
    }

    pub fn fields(&self) -> &ExtractedFields {
        &self.fields
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 解析を開始できるか（画像があり、呼び出し中でない）
    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && !self.loading
    }

    /// パイプラインを差し替える（次の解析から有効）
    pub fn set_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
    }

    /// 画像を差し替える。前の結果とフィールドは破棄する
    ///
    /// 呼び出し中は差し替えない（false を返す）。応答が別の画像に付くため
    pub fn set_image(&mut self, image: ImageData) -> bool {
        if self.loading {
            tracing::debug!("analysis in flight; image change refused");
            return false;
        }
        self.image = Some(image);
        self.result = None;
        self.fields = ExtractedFields::default();
        true
    }

    /// 解析を開始する
    ///
    /// 画像がない、または呼び出し中なら何もせず None
    pub fn begin_analysis(&mut self) -> Option<GenerationRequest> {
        let image = self.startable_image()?;
        self.loading = true;
        self.result = None;
        self.fields = ExtractedFields::default();
        Some(GenerationRequest::with_image(self.pipeline.prompt.clone(), image))
    }

    /// 関連質問をたずねる（成功すれば結果を上書き）
    ///
    /// 画像がない、呼び出し中、または質問が空なら何もせず None
    pub fn begin_follow_up(&mut self, question: &str) -> Option<GenerationRequest> {
        if question.trim().is_empty() {
            return None;
        }
        let image = self.startable_image()?;
        self.loading = true;
        Some(GenerationRequest::with_image(build_follow_up_prompt(question), image))
    }

    fn startable_image(&self) -> Option<ImageData> {
        if self.loading {
            tracing::debug!("analysis already in flight; ignoring trigger");
            return None;
        }
        self.image.clone()
    }

    /// AI呼び出しの結果を反映する
    ///
    /// 成功時は結果を保存してフィールドを再計算する。パイプラインが
    /// 2回目の呼び出しを使う場合はそのリクエストを返し、読み込み中のままにする。
    /// 失敗時はログを出し、読み込み中を解除して結果は設定しない。
    pub fn complete(&mut self, outcome: Result<String>) -> Option<GenerationRequest> {
        match outcome {
            Ok(text) => {
                tracing::debug!(chars = text.len(), "analysis result received");
                self.fields = self.pipeline.process(&text);
                let next = self.pipeline.questions_request(&text);
                self.result = Some(text);
                self.loading = next.is_some();
                next
            }
            Err(e) => {
                tracing::error!(error = %e, "analysis failed");
                self.loading = false;
                None
            }
        }
    }

    /// 2回目の呼び出し（関連質問リスト）の結果を反映する
    pub fn complete_questions(&mut self, outcome: Result<String>) {
        self.fields.questions = match outcome {
            Ok(text) => parse_question_list(&text),
            Err(e) => {
                tracing::warn!(error = %e, "related question request failed");
                Vec::new()
            }
        };
        self.loading = false;
    }

    /// 画像を解析する。結果が得られたら true
    pub async fn analyze<G>(&mut self, generator: &G) -> bool
    where
        G: TextGenerator + ?Sized,
    {
        let Some(request) = self.begin_analysis() else {
            return false;
        };
        self.run(generator, request).await
    }

    /// 関連質問をたずねる。結果が得られたら true
    pub async fn ask<G>(&mut self, generator: &G, question: &str) -> bool
    where
        G: TextGenerator + ?Sized,
    {
        let Some(request) = self.begin_follow_up(question) else {
            return false;
        };
        self.run(generator, request).await
    }

    async fn run<G>(&mut self, generator: &G, request: GenerationRequest) -> bool
    where
        G: TextGenerator + ?Sized,
    {
        let outcome = generator.generate(&request).await;
        let succeeded = outcome.is_ok();

        if let Some(questions_request) = self.complete(outcome) {
            let outcome = generator.generate(&questions_request).await;
            self.complete_questions(outcome);
        }

        succeeded
    }
}
