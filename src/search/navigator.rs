//! マッチ間の移動

use crate::error::{search::Result, SearchError};

/// 現在のマッチを指すカーソル
///
/// マッチ集合が空でなければ `0 <= cursor < len` を常に満たし、空なら `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchNavigator {
    cursor: Option<usize>,
    len: usize,
    wrapped: bool,
}

impl MatchNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 件数を設定して先頭のマッチを選択する
    pub fn reset(&mut self, len: usize) -> Option<usize> {
        self.len = len;
        self.cursor = if len == 0 { None } else { Some(0) };
        self.wrapped = false;
        self.cursor
    }

    /// 選択を解除
    pub fn clear(&mut self) {
        self.reset(0);
    }

    /// 現在のカーソル
    pub fn current(&self) -> Option<usize> {
        self.cursor
    }

    /// 対象のマッチ数
    pub fn len(&self) -> usize {
        self.len
    }

    /// マッチが無いか判定
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 直前の移動で折り返したか
    pub fn wrapped(&self) -> bool {
        self.wrapped
    }

    /// 次のマッチへ（末尾から先頭へ折り返す）
    pub fn next(&mut self) -> Option<usize> {
        let idx = self.cursor?;
        let next = (idx + 1) % self.len;
        self.wrapped = next <= idx;
        self.cursor = Some(next);
        self.cursor
    }

    /// 前のマッチへ（先頭から末尾へ折り返す）
    pub fn previous(&mut self) -> Option<usize> {
        let idx = self.cursor?;
        let prev = (idx + self.len - 1) % self.len;
        self.wrapped = prev >= idx;
        self.cursor = Some(prev);
        self.cursor
    }

    /// 指定番号のマッチを選択
    pub fn select(&mut self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(SearchError::OutOfRange {
                offset: index,
                len: self.len,
            });
        }
        self.cursor = Some(index);
        self.wrapped = false;
        Ok(index)
    }

    /// `from` 以降で最初に始まるマッチを選択する。無ければ先頭へ折り返す
    pub fn seek(&mut self, offsets: &[usize], from: usize) -> Option<usize> {
        self.reset(offsets.len());
        if offsets.is_empty() {
            return None;
        }

        let idx = offsets.partition_point(|&offset| offset < from);
        if idx < offsets.len() {
            self.cursor = Some(idx);
        } else {
            self.cursor = Some(0);
            self.wrapped = true;
        }
        self.cursor
    }
}
