//! 読み込み中表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="spinner" />
            <p class="progress-text">"解析中..."</p>
        </div>
    }
}
