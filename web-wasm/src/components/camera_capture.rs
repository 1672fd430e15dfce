//! カメラ撮影コンポーネント

use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::MediaStream;

use crate::camera::{capture_frame, open_stream, stop_stream};

#[component]
pub fn CameraCapture<F>(is_loading: Signal<bool>, on_image: F) -> impl IntoView
where
    F: Fn(String, String) + 'static + Clone,
{
    let video_ref = NodeRef::<Video>::new();
    // MediaStream は Send でないのでローカルに保持する
    let stream = StoredValue::new_local(None::<MediaStream>);
    let (is_active, set_is_active) = signal(false);

    let stop = move || {
        stream.update_value(|s| {
            if let Some(active) = s.take() {
                stop_stream(&active);
            }
        });
        set_is_active.set(false);
    };

    let on_start = move |_| {
        // 前のストリームは先に止める
        stop();
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match open_stream(&video).await {
                Ok(opened) => {
                    stream.set_value(Some(opened));
                    set_is_active.set(true);
                }
                Err(e) => gloo::console::error!("カメラを開けませんでした", e),
            }
        });
    };

    let on_capture = move |_| {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        match capture_frame(&video) {
            Ok(data_url) => {
                let name = format!("camera-{}.jpg", js_sys::Date::now() as u64);
                on_image(name, data_url);
            }
            Err(e) => gloo::console::error!("撮影に失敗しました", e),
        }
        stop();
    };

    view! {
        <div class="camera-capture">
            <video
                node_ref=video_ref
                class="camera-preview"
                class:hidden=move || !is_active.get()
                autoplay=true
                playsinline=true
                muted=true
            />
            <div class="camera-actions">
                <button
                    class="btn btn-secondary"
                    class:hidden=move || is_active.get()
                    disabled=move || is_loading.get()
                    on:click=on_start
                >
                    "📷 カメラで撮影"
                </button>
                <button
                    class="btn btn-primary"
                    class:hidden=move || !is_active.get()
                    disabled=move || is_loading.get()
                    on:click=on_capture
                >
                    "撮影"
                </button>
                <button
                    class="btn btn-tertiary"
                    class:hidden=move || !is_active.get()
                    on:click=move |_| stop()
                >
                    "キャンセル"
                </button>
            </div>
        </div>
    }
}
