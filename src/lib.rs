//! plant-ai CLI library
//!
//! 画像読み込み、Gemini呼び出し、PDF出力。後処理は plant_ai_common を使う

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gemini;
pub mod loader;
pub mod logging;
pub mod runner;
