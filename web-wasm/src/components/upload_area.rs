//! アップロードエリアコンポーネント

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, HtmlInputElement};

#[component]
pub fn UploadArea<F>(
    api_key: ReadSignal<String>,
    is_loading: Signal<bool>,
    on_image: F,
) -> impl IntoView
where
    F: Fn(String, String) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    // 解析中は画像を差し替えない
    let is_enabled = move || !api_key.get().is_empty() && !is_loading.get();

    let handle_files = {
        let on_image = on_image.clone();
        move |files: FileList| {
            // 先頭の1枚だけを使う
            if let Some(file) = files.get(0) {
                if let Err(e) = read_file(file, on_image.clone()) {
                    gloo::console::error!(e);
                }
            }
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if !is_enabled() {
                return;
            }

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                handle_files(files);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if is_enabled() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = {
        let handle_files = handle_files.clone();
        move |_| {
            if !is_enabled() {
                return;
            }
            if let Err(e) = open_file_dialog(handle_files.clone()) {
                gloo::console::error!(e);
            }
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if !is_enabled() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <Show
                when=move || !api_key.get().is_empty()
                fallback=|| view! {
                    <div class="upload-icon">"🔑"</div>
                    <p>"APIキーを入力してください"</p>
                    <p class="text-muted">"上の設定欄でGemini APIキーを設定すると写真を選択できます"</p>
                }
            >
                <div class="upload-icon">"🌿"</div>
                <p>"植物の写真をドラッグ&ドロップ または クリックして選択"</p>
                <p class="text-muted">
                    {move || if is_loading.get() { "解析中は画像を変更できません" } else { "対応形式: JPEG, PNG, WebP, GIF, HEIC" }}
                </p>
            </Show>
        </div>
    }
}

/// ファイル選択ダイアログを開く
fn open_file_dialog<H>(handle_files: H) -> Result<(), JsValue>
where
    H: Fn(FileList) + 'static,
{
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("file");
    input.set_accept("image/*");

    let input_clone = input.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(files) = input_clone.files() {
            handle_files(files);
        }
    }) as Box<dyn FnMut(_)>);

    input.set_onchange(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    input.click();
    Ok(())
}

/// ファイルを Data URL として読み込み、(ファイル名, Data URL) を渡す
fn read_file<F>(file: File, on_image: F) -> Result<(), JsValue>
where
    F: Fn(String, String) + 'static,
{
    let file_name = file.name();
    let reader = FileReader::new()?;

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Some(data_url) = reader_clone.result().ok().and_then(|r| r.as_string()) {
            on_image(file_name.clone(), data_url);
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    reader.read_as_data_url(&file)
}
