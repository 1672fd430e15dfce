//! 設定パネルコンポーネント

use leptos::prelude::*;
use plant_ai_common::{QuestionSource, Variant};

const VARIANTS: [(Variant, &str); 3] = [
    (Variant::Overview, "概要 + キーワード"),
    (Variant::CareSheet, "ケアシート"),
    (Variant::Explorer, "概要 + 関連質問"),
];

const QUESTION_SOURCES: [(QuestionSource, &str); 3] = [
    (QuestionSource::None, "なし"),
    (QuestionSource::Marker, "応答から抽出"),
    (QuestionSource::FollowUpCall, "追加でたずねる"),
];

/// APIキーは保存しない（ページを閉じると消える）
#[component]
pub fn SettingsPanel(
    api_key: ReadSignal<String>,
    set_api_key: WriteSignal<String>,
    variant: ReadSignal<Variant>,
    set_variant: WriteSignal<Variant>,
    question_source: ReadSignal<QuestionSource>,
    set_question_source: WriteSignal<QuestionSource>,
) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="api-key">"Gemini API Key"</label>
                    <input
                        type="password"
                        id="api-key"
                        placeholder="API Keyを入力..."
                        prop:value=move || api_key.get()
                        on:input=move |ev| {
                            set_api_key.set(event_target_value(&ev));
                        }
                    />
                    <a
                        href="https://aistudio.google.com/app/apikey"
                        target="_blank"
                        rel="noopener noreferrer"
                        class="api-key-link"
                    >
                        "APIキーを取得 →"
                    </a>
                </div>

                <div class="form-group">
                    <label for="variant">"解析モード"</label>
                    <select
                        id="variant"
                        on:change=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse::<Variant>() {
                                set_variant.set(value);
                            }
                        }
                    >
                        {VARIANTS
                            .into_iter()
                            .map(|(value, label)| view! {
                                <option value=value.as_str() selected=move || variant.get() == value>
                                    {label}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="question-source">"関連質問"</label>
                    <select
                        id="question-source"
                        on:change=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse::<QuestionSource>() {
                                set_question_source.set(value);
                            }
                        }
                    >
                        {QUESTION_SOURCES
                            .into_iter()
                            .map(|(value, label)| view! {
                                <option
                                    value=question_source_value(value)
                                    selected=move || question_source.get() == value
                                >
                                    {label}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
            </div>
        </div>
    }
}

fn question_source_value(source: QuestionSource) -> &'static str {
    match source {
        QuestionSource::None => "none",
        QuestionSource::Marker => "marker",
        QuestionSource::FollowUpCall => "follow-up",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_values_parse_back() {
        for (variant, _) in VARIANTS {
            assert_eq!(variant.as_str().parse::<Variant>().unwrap(), variant);
        }
        for (source, _) in QUESTION_SOURCES {
            assert_eq!(
                question_source_value(source).parse::<QuestionSource>().unwrap(),
                source,
                "選択肢の値がパースできない"
            );
        }
    }
}
