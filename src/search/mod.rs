//! 検索モジュール
//!
//! リテラル検索・マッチ移動・ハイライト投影・置換を提供

mod highlight;
mod matcher;
mod navigator;
mod replace;
pub mod types;

pub use highlight::{HighlightMarkers, HighlightProjector, HighlightView};
pub use matcher::{LiteralMatcher, MatchIndex, StringMatcher};
pub use navigator::MatchNavigator;
pub use replace::{ReplaceEngine, Replacement};
pub use types::{MatchSet, SearchHighlight, SearchPhase, SearchStatus, SearchUiState};

/// 既定のリテラルマッチャーで全マッチを探す
pub fn find_all(text: &str, term: &str) -> Vec<usize> {
    LiteralMatcher::new().find_all(text, term)
}
