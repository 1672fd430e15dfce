//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use plant_ai_common::{
    GenerationRequest, ImageData, Pipeline, QuestionSource, Session, TextGenerator, Variant,
};

use crate::api::gemini::{build_time_api_key, GeminiClient};
use crate::components::{
    action_buttons::ActionButtons,
    camera_capture::CameraCapture,
    header::Header,
    loading_indicator::LoadingIndicator,
    result_view::ResultView,
    settings_panel::SettingsPanel,
    upload_area::UploadArea,
};
use crate::export::pdf_wasm;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let (api_key, set_api_key) = signal(build_time_api_key().to_string());
    let (variant, set_variant) = signal(Variant::default());
    let (question_source, set_question_source) = signal(QuestionSource::default());
    let (file_name, set_file_name) = signal(String::new());
    let (preview, set_preview) = signal(None::<String>);
    let session = RwSignal::new(Session::default());

    let is_loading = Signal::derive(move || session.with(|s| s.is_loading()));
    let can_analyze = Signal::derive(move || session.with(|s| s.can_analyze()));
    let has_result = Signal::derive(move || session.with(|s| s.result().is_some()));

    // 画像選択ハンドラ（アップロード・カメラ共通）
    let on_image = move |name: String, data_url: String| match ImageData::from_data_url(&data_url) {
        Ok(image) => {
            if session.try_update(|s| s.set_image(image)).unwrap_or(false) {
                set_file_name.set(name);
                set_preview.set(Some(data_url));
            } else {
                gloo::console::warn!("解析中は画像を変更できません");
            }
        }
        Err(e) => gloo::console::error!(format!("画像の読み込みに失敗: {}", e)),
    };

    // 解析開始ハンドラ
    let on_analyze = move |_: ()| {
        let pipeline = Pipeline::preset(variant.get_untracked())
            .with_question_source(question_source.get_untracked());
        let request = session
            .try_update(|s| {
                if s.is_loading() {
                    return None;
                }
                s.set_pipeline(pipeline);
                s.begin_analysis()
            })
            .flatten();

        if let Some(request) = request {
            run(session, GeminiClient::new(api_key.get_untracked()), request);
        }
    };

    // 関連質問ハンドラ
    let on_ask = move |question: String| {
        let request = session.try_update(|s| s.begin_follow_up(&question)).flatten();
        if let Some(request) = request {
            run(session, GeminiClient::new(api_key.get_untracked()), request);
        }
    };

    // PDF出力ハンドラ
    let on_export_pdf = move |_: ()| {
        let Some(text) = session.with_untracked(|s| s.result().map(str::to_string)) else {
            return;
        };
        let name = file_name.get_untracked();
        if let Err(e) = pdf_wasm::download_pdf(&text, &name) {
            gloo::console::error!(format!("PDF出力に失敗: {}", e));
        }
    };

    view! {
        <div class="container">
            <Header />

            <SettingsPanel
                api_key=api_key
                set_api_key=set_api_key
                variant=variant
                set_variant=set_variant
                question_source=question_source
                set_question_source=set_question_source
            />

            <UploadArea api_key=api_key is_loading=is_loading on_image=on_image />
            <CameraCapture is_loading=is_loading on_image=on_image />

            <Show when=move || is_loading.get()>
                <LoadingIndicator />
            </Show>

            <ActionButtons
                can_analyze=can_analyze
                is_loading=is_loading
                has_result=has_result
                on_analyze=on_analyze
                on_export_pdf=on_export_pdf
            />

            <ResultView
                session=session
                preview=preview
                file_name=file_name
                on_ask=on_ask
            />
        </div>
    }
}

/// AI呼び出しを実行して結果を Session に反映する
///
/// パイプラインが2回目の呼び出しを要求した場合は続けて関連質問を取得する
fn run(session: RwSignal<Session>, client: GeminiClient, request: GenerationRequest) {
    spawn_local(async move {
        let outcome = client.generate(&request).await;
        if let Err(e) = &outcome {
            gloo::console::error!(format!("解析エラー: {}", e));
        }

        let next = session.try_update(|s| s.complete(outcome)).flatten();
        let Some(next) = next else {
            return;
        };

        let outcome = client.generate(&next).await;
        if let Err(e) = &outcome {
            gloo::console::warn!(format!("関連質問の取得に失敗: {}", e));
        }
        session.update(|s| s.complete_questions(outcome));
    });
}
