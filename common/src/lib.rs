//! Plant AI Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod encoding;
pub mod gemini;
pub mod postprocess;
pub mod prompts;
pub mod pipeline;
pub mod session;
pub mod export;

pub use types::{AnalysisRecord, ExtractedFields, GenerationRequest, ImageData};
pub use error::{Error, Result};
pub use postprocess::{
    extract_keywords, extract_properties, extract_questions, normalize, parse_lines,
    parse_question_list, split_property, split_question_section, Line, LineKind,
};
pub use pipeline::{Extractor, Pipeline, QuestionSource, Variant};
pub use session::{Session, TextGenerator};
pub use export::pdf_core::{wrap_text, TextPdfLayout};
