//! カメラ撮影（getUserMedia）
//!
//! ストリームは撮影後、または新しい撮影を始める前に stop_stream で解放する

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

/// 撮影画像のMIMEタイプ
pub const CAPTURE_MIME_TYPE: &str = "image/jpeg";

/// カメラのストリームを開いて video 要素に接続する
pub async fn open_stream(video: &HtmlVideoElement) -> Result<MediaStream, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let devices = window.navigator().media_devices()?;

    let constraints = MediaStreamConstraints::new();
    // 背面カメラを優先
    let video_constraints = js_sys::Object::new();
    js_sys::Reflect::set(
        &video_constraints,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str("environment"),
    )?;
    constraints.set_video(&video_constraints);
    constraints.set_audio(&JsValue::FALSE);

    let stream: MediaStream =
        JsFuture::from(devices.get_user_media_with_constraints(&constraints)?)
            .await?
            .dyn_into()?;

    video.set_src_object(Some(&stream));
    JsFuture::from(video.play()?).await?;

    Ok(stream)
}

/// ストリームの全トラックを停止する
pub fn stop_stream(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// video の現在フレームをJPEGのData URLとして取り出す
pub fn capture_frame(video: &HtmlVideoElement) -> Result<String, JsValue> {
    let width = video.video_width();
    let height = video.video_height();
    if width == 0 || height == 0 {
        return Err(JsValue::from_str("video not ready"));
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context not available"))?
        .dyn_into()?;
    context.draw_image_with_html_video_element(video, 0.0, 0.0)?;

    canvas.to_data_url_with_type(CAPTURE_MIME_TYPE)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use plant_ai_common::ImageData;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_canvas_data_url_is_accepted_as_image() {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
        canvas.set_width(4);
        canvas.set_height(3);

        let data_url = canvas.to_data_url_with_type(CAPTURE_MIME_TYPE).unwrap();
        let image = ImageData::from_data_url(&data_url).expect("Data URL変換失敗");

        assert_eq!(image.mime_type, "image/jpeg");
        assert!(!image.decode().unwrap().is_empty());
    }

    #[wasm_bindgen_test]
    fn wasm_capture_frame_without_stream_is_error() {
        let document = web_sys::window().unwrap().document().unwrap();
        let video: HtmlVideoElement = document.create_element("video").unwrap().dyn_into().unwrap();
        assert!(capture_frame(&video).is_err(), "映像がないのに撮影できた");
    }
}
