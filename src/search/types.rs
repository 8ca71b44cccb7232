//! 検索関連の共通型

use std::ops::Range;

use crate::buffer::{Generation, TextBuffer};
use crate::error::{search::Result, SearchError};

/// 検索ライフサイクルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// 検索語なし
    #[default]
    Idle,
    /// マッチ集合を計算済み（空の場合を含む）
    Searched,
    /// マッチ間を移動中
    Navigating,
    /// 置換中（再計算後に Searched へ戻る）
    Replacing,
}

/// 検索状態の表示ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// 検索していない
    Idle,
    /// 検索中（マッチあり）
    Active,
    /// マッチが見つからない
    NotFound,
    /// 折り返しが発生
    Wrapped,
}

/// ある世代のドキュメントに対して計算したマッチ集合
///
/// オフセットはバイト単位で昇順、互いに重ならない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    term: String,
    offsets: Vec<usize>,
    generation: Generation,
}

impl MatchSet {
    pub(crate) fn new(term: &str, offsets: Vec<usize>, generation: Generation) -> Self {
        Self {
            term: term.to_string(),
            offsets,
            generation,
        }
    }

    /// 検索語
    pub fn term(&self) -> &str {
        &self.term
    }

    /// 検索語のバイト長
    pub fn term_len(&self) -> usize {
        self.term.len()
    }

    /// マッチ開始位置の一覧
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// マッチ数
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// マッチが無いか判定
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// index 番目のマッチ開始位置
    pub fn get(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    /// index 番目のマッチ範囲（検証なし）
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        self.get(index).map(|start| start..start + self.term.len())
    }

    /// 計算時のドキュメント世代
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// バッファの現在の世代に対して有効か
    pub fn is_current_for(&self, buffer: &TextBuffer) -> bool {
        self.generation == buffer.generation()
    }

    /// 世代が一致しなければ `StaleMatch`
    pub fn ensure_current(&self, buffer: &TextBuffer) -> Result<()> {
        if self.is_current_for(buffer) {
            Ok(())
        } else {
            Err(SearchError::StaleMatch {
                computed: self.generation,
                current: buffer.generation(),
            })
        }
    }

    /// 世代・範囲・内容を検証したうえで index 番目のマッチ範囲を返す
    pub fn checked_range(&self, buffer: &TextBuffer, index: usize) -> Result<Range<usize>> {
        let range = self.range(index).ok_or(SearchError::OutOfRange {
            offset: index,
            len: self.len(),
        })?;
        self.ensure_current(buffer)?;

        match buffer.get().get(range.clone()) {
            Some(found) if found == self.term => Ok(range),
            _ => Err(SearchError::StaleMatch {
                computed: self.generation,
                current: buffer.generation(),
            }),
        }
    }
}

/// UI描画用のハイライト情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHighlight {
    /// 行番号
    pub line: usize,
    /// 行内開始位置（バイト単位）
    pub start_column: usize,
    /// 行内終了位置（バイト単位、排他的）
    pub end_column: usize,
    /// 現在のマッチであるか
    pub is_current: bool,
}

/// ステータス表示用の検索UI状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUiState {
    /// 現在の検索語
    pub pattern: String,
    /// ステータス
    pub status: SearchStatus,
    /// 現在のマッチ番号（1-based）
    pub current_match: Option<usize>,
    /// 総マッチ数
    pub total_matches: usize,
    /// 折り返しが発生したか
    pub wrapped: bool,
    /// メッセージ（失敗や通知）
    pub message: Option<String>,
}

impl SearchUiState {
    /// 検索していない状態
    pub fn idle() -> Self {
        Self {
            pattern: String::new(),
            status: SearchStatus::Idle,
            current_match: None,
            total_matches: 0,
            wrapped: false,
            message: None,
        }
    }

    /// 結果件数ラベル
    pub fn results_label(&self) -> String {
        format!("Results: {}", self.total_matches)
    }

    /// エラー状態かを判定
    pub fn is_error(&self) -> bool {
        matches!(self.status, SearchStatus::NotFound)
    }
}
