//! 操作ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn ActionButtons<FA, FP>(
    can_analyze: Signal<bool>,
    is_loading: Signal<bool>,
    has_result: Signal<bool>,
    on_analyze: FA,
    on_export_pdf: FP,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone,
    FP: Fn(()) + 'static + Clone,
{
    view! {
        <div class="export-buttons">
            <button
                class="btn btn-primary"
                disabled=move || !can_analyze.get()
                on:click={
                    let on_analyze = on_analyze.clone();
                    move |_| on_analyze(())
                }
            >
                {move || if is_loading.get() { "解析中..." } else { "AI解析開始" }}
            </button>

            <button
                class="btn btn-secondary"
                disabled=move || !has_result.get() || is_loading.get()
                on:click={
                    let on_export_pdf = on_export_pdf.clone();
                    move |_| on_export_pdf(())
                }
            >
                "PDF出力"
            </button>
        </div>
    }
}
