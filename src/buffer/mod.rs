//! バッファモジュール
//!
//! 正規テキストの保持と世代管理を提供

mod text_buffer;

pub use text_buffer::{DocumentStats, Generation, TextBuffer};
