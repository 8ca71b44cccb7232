//! UIモジュール
//!
//! 描画層へ渡すスクロール状態

pub mod viewport;

// 公開API
pub use viewport::{ScrollMargins, Viewport};
