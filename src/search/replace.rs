//! 置換エンジン
//!
//! 正規バッファに対して1件または全件のリテラル置換を行い、
//! 変更後のドキュメントからマッチ集合を再計算して返す

use super::matcher::{LiteralMatcher, MatchIndex, StringMatcher};
use super::types::MatchSet;
use crate::buffer::TextBuffer;
use crate::error::{search::Result, SearchError};

/// 置換結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// 置換した件数
    pub count: usize,
    /// 最後に挿入した置換文字列の直後（再選択の起点）
    pub resume_at: usize,
    /// 変更後のドキュメントに対して再計算したマッチ集合
    pub matches: MatchSet,
}

/// 置換コントローラー
#[derive(Debug, Clone)]
pub struct ReplaceEngine<M: StringMatcher = LiteralMatcher> {
    index: MatchIndex<M>,
}

impl ReplaceEngine<LiteralMatcher> {
    pub fn new() -> Self {
        Self::with_index(MatchIndex::new())
    }
}

impl<M: StringMatcher> ReplaceEngine<M> {
    pub fn with_index(index: MatchIndex<M>) -> Self {
        Self { index }
    }

    /// 現在のマッチだけを置換する
    ///
    /// 古い世代のマッチ集合は `StaleMatch` で拒否する。戻り値の `matches` は
    /// 新しいドキュメントに対して再計算したもので、以後はこちらを使う
    pub fn replace_current(
        &self,
        buffer: &mut TextBuffer,
        matches: &MatchSet,
        cursor: Option<usize>,
        replacement: &str,
    ) -> Result<Replacement> {
        let index = match cursor {
            Some(index) if !matches.is_empty() => index,
            _ => return Err(SearchError::NoMatchSelected),
        };
        let range = matches.checked_range(buffer, index)?;

        let mut text = buffer.get().to_string();
        text.replace_range(range.clone(), replacement);
        buffer.set(text);
        log::info!(
            "replaced match {} at {} ({} -> {} bytes)",
            index + 1,
            range.start,
            range.len(),
            replacement.len()
        );

        Ok(Replacement {
            count: 1,
            resume_at: range.start + replacement.len(),
            matches: self.index.index(buffer, matches.term()),
        })
    }

    /// すべてのマッチを置換し、置換件数を返す
    ///
    /// 1件も無い場合はドキュメントも世代も変更しない
    pub fn replace_all(
        &self,
        buffer: &mut TextBuffer,
        term: &str,
        replacement: &str,
    ) -> Result<Replacement> {
        if term.is_empty() {
            return Err(SearchError::EmptyTerm);
        }

        let offsets = self.index.find_all(buffer.get(), term);
        if offsets.is_empty() {
            return Ok(Replacement {
                count: 0,
                resume_at: 0,
                matches: self.index.index(buffer, term),
            });
        }

        let text = buffer.get();
        let mut replaced = String::with_capacity(text.len());
        let mut last = 0usize;
        for &offset in &offsets {
            replaced.push_str(&text[last..offset]);
            replaced.push_str(replacement);
            last = offset + term.len();
        }
        replaced.push_str(&text[last..]);
        let resume_at = replaced.len() - (text.len() - last);

        buffer.set(replaced);
        log::info!("replaced {} occurrence(s) of {:?}", offsets.len(), term);

        Ok(Replacement {
            count: offsets.len(),
            resume_at,
            matches: self.index.index(buffer, term),
        })
    }
}

impl Default for ReplaceEngine<LiteralMatcher> {
    fn default() -> Self {
        Self::new()
    }
}
