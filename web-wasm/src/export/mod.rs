//! エクスポート（WASM版）

pub mod js_bindings;
pub mod pdf_wasm;
