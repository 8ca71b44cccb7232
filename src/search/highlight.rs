//! ハイライト投影
//!
//! 正規テキストのコピーに現在のマッチを括弧で囲んだ表示用文字列を作る。
//! 投影結果は描画のたびに作り直して捨てるもので、正規テキストには戻さない

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::types::{MatchSet, SearchHighlight};
use crate::buffer::TextBuffer;
use crate::error::{search::Result, SearchError};

/// 現在のマッチを囲むマーカー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightMarkers {
    pub open: String,
    pub close: String,
}

impl Default for HighlightMarkers {
    fn default() -> Self {
        Self {
            open: "⬅️".to_string(),
            close: "➡️".to_string(),
        }
    }
}

/// 表示専用の投影結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightView {
    text: String,
    selected: Option<Range<usize>>,
}

impl HighlightView {
    /// マーカーなしの投影
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            selected: None,
        }
    }

    /// 表示用文字列
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// 表示用文字列中で選択マッチが占める範囲（マーカーを除く）
    pub fn selected_range(&self) -> Option<Range<usize>> {
        self.selected.clone()
    }

    /// マーカーが挿入されているか
    pub fn is_marked(&self) -> bool {
        self.selected.is_some()
    }
}

/// 正規テキストから表示用の投影を作る
#[derive(Debug, Clone, Default)]
pub struct HighlightProjector {
    markers: HighlightMarkers,
}

impl HighlightProjector {
    pub fn new(markers: HighlightMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &HighlightMarkers {
        &self.markers
    }

    /// 現在のマッチを括弧で囲んだ投影を作る
    ///
    /// マッチ集合がバッファの現在の世代と一致しない場合や範囲がずれている場合は
    /// 括弧付けを行わず `StaleMatch` を返す
    pub fn project(
        &self,
        buffer: &TextBuffer,
        matches: &MatchSet,
        cursor: Option<usize>,
    ) -> Result<HighlightView> {
        let Some(index) = cursor else {
            return Ok(HighlightView::plain(buffer.get()));
        };

        let range = matches.checked_range(buffer, index)?;
        let text = buffer.get();
        let open = self.markers.open.as_str();
        let close = self.markers.close.as_str();

        let mut projected = String::with_capacity(text.len() + open.len() + close.len());
        projected.push_str(&text[..range.start]);
        projected.push_str(open);
        let selected_start = projected.len();
        projected.push_str(&text[range.clone()]);
        let selected_end = projected.len();
        projected.push_str(close);
        projected.push_str(&text[range.end..]);

        Ok(HighlightView {
            text: projected,
            selected: Some(selected_start..selected_end),
        })
    }

    /// すべてのマッチについて行単位のハイライト範囲を作る
    ///
    /// マッチ内に改行がある場合は最初の改行の手前で切る
    pub fn spans(
        &self,
        buffer: &TextBuffer,
        matches: &MatchSet,
        cursor: Option<usize>,
    ) -> Result<Vec<SearchHighlight>> {
        matches.ensure_current(buffer)?;

        let text = buffer.get();
        let bytes = text.as_bytes();
        let term_len = matches.term_len();
        let mut highlights = Vec::with_capacity(matches.len());
        let mut line = 0usize;
        let mut line_start = 0usize;
        let mut scanned = 0usize;

        for (idx, &offset) in matches.offsets().iter().enumerate() {
            let matched = text
                .get(offset..offset + term_len)
                .ok_or(SearchError::StaleMatch {
                    computed: matches.generation(),
                    current: buffer.generation(),
                })?;

            for (pos, byte) in bytes[scanned..offset].iter().enumerate() {
                if *byte == b'\n' {
                    line += 1;
                    line_start = scanned + pos + 1;
                }
            }
            scanned = offset;

            let span = matched.find('\n').unwrap_or(term_len);
            if span == 0 {
                continue;
            }
            highlights.push(SearchHighlight {
                line,
                start_column: offset - line_start,
                end_column: offset - line_start + span,
                is_current: cursor == Some(idx),
            });
        }

        Ok(highlights)
    }
}
