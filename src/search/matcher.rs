//! 検索用マッチャー

use super::types::MatchSet;
use crate::buffer::TextBuffer;

/// 文字列マッチング戦略
pub trait StringMatcher {
    /// 文字列内のすべてのマッチ開始位置（バイト単位）を返す
    ///
    /// 左から右へ走査し、マッチの直後から再開する（重なりは数えない）
    fn find_all(&self, text: &str, term: &str) -> Vec<usize>;
}

/// 単純なリテラルマッチャー（標準ライブラリの Two-Way 探索を利用）
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralMatcher;

impl LiteralMatcher {
    /// インスタンスを作成
    pub fn new() -> Self {
        Self
    }
}

impl StringMatcher for LiteralMatcher {
    fn find_all(&self, text: &str, term: &str) -> Vec<usize> {
        if term.is_empty() {
            return Vec::new();
        }

        let mut offsets = Vec::new();
        let mut start = 0usize;
        while let Some(found) = text[start..].find(term) {
            let offset = start + found;
            offsets.push(offset);
            start = offset + term.len();
        }
        offsets
    }
}

/// 検索語からマッチ集合を作るインデックス
#[derive(Debug, Clone)]
pub struct MatchIndex<M: StringMatcher = LiteralMatcher> {
    matcher: M,
}

impl MatchIndex<LiteralMatcher> {
    /// 既定のリテラルマッチャーで作成
    pub fn new() -> Self {
        Self::with_matcher(LiteralMatcher::new())
    }
}

impl<M: StringMatcher> MatchIndex<M> {
    /// マッチャーを差し替えて作成
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// テキスト内のすべてのマッチ開始位置
    pub fn find_all(&self, text: &str, term: &str) -> Vec<usize> {
        self.matcher.find_all(text, term)
    }

    /// バッファの現在の世代に束縛したマッチ集合を作成
    pub fn index(&self, buffer: &TextBuffer, term: &str) -> MatchSet {
        let offsets = self.matcher.find_all(buffer.get(), term);
        log::debug!(
            "indexed {} match(es) for {:?} at {}",
            offsets.len(),
            term,
            buffer.generation()
        );
        MatchSet::new(term, offsets, buffer.generation())
    }
}

impl Default for MatchIndex<LiteralMatcher> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_basic_matches() {
        let matcher = LiteralMatcher::new();
        assert_eq!(matcher.find_all("hello world hello", "hello"), vec![0, 12]);
        assert_eq!(matcher.find_all("hello world", "o"), vec![4, 7]);
    }

    #[test]
    fn does_not_count_overlaps() {
        let matcher = LiteralMatcher::new();
        assert_eq!(matcher.find_all("aaaa", "aa"), vec![0, 2]);
        assert_eq!(matcher.find_all("aaa", "aa"), vec![0]);
    }

    #[test]
    fn empty_term_yields_nothing() {
        let matcher = LiteralMatcher::new();
        assert!(matcher.find_all("abc", "").is_empty());
        assert!(matcher.find_all("", "a").is_empty());
    }

    #[test]
    fn offsets_are_bytes() {
        let matcher = LiteralMatcher::new();
        assert_eq!(matcher.find_all("日本語 日本", "日本"), vec![0, 10]);
    }

    #[test]
    fn index_binds_generation() {
        let mut buffer = TextBuffer::from_str("ab ab");
        let index = MatchIndex::new();
        let set = index.index(&buffer, "ab");
        assert_eq!(set.offsets(), &[0, 3]);
        assert_eq!(set.term(), "ab");
        assert!(set.is_current_for(&buffer));

        buffer.set("ab ab");
        assert!(!set.is_current_for(&buffer));
    }
}
