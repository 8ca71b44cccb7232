//! 編集セッション
//!
//! 正規バッファと検索状態を1つにまとめ、エディタUIから呼ばれる
//! 入出力インターフェースを提供する。描画や入力ウィジェットには依存しない

use unicode_width::UnicodeWidthStr;

use crate::buffer::{DocumentStats, TextBuffer};
use crate::config::EngineConfig;
use crate::error::{search::Result, SearchError};
use crate::position::{display_column, to_line_col, LineCol};
use crate::search::{
    HighlightProjector, HighlightView, LiteralMatcher, MatchIndex, MatchNavigator, MatchSet,
    ReplaceEngine, Replacement, SearchHighlight, SearchPhase, SearchStatus, SearchUiState,
    StringMatcher,
};
use crate::ui::Viewport;

/// 検索・置換セッション
#[derive(Debug, Clone)]
pub struct SearchSession<M: StringMatcher = LiteralMatcher> {
    buffer: TextBuffer,
    index: MatchIndex<M>,
    replacer: ReplaceEngine<M>,
    projector: HighlightProjector,
    navigator: MatchNavigator,
    /// `None` は検索していない状態（Idle）
    matches: Option<MatchSet>,
    phase: SearchPhase,
    viewport: Viewport,
}

impl SearchSession<LiteralMatcher> {
    /// 空のドキュメントで作成
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// 文字列から作成
    pub fn from_text(text: &str) -> Self {
        let mut session = Self::new();
        session.buffer = TextBuffer::from_str(text);
        session
    }

    /// 設定を適用して作成
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_matcher(LiteralMatcher::new(), config)
    }
}

impl<M: StringMatcher + Clone> SearchSession<M> {
    /// マッチャーを差し替えて作成
    pub fn with_matcher(matcher: M, config: &EngineConfig) -> Self {
        Self {
            buffer: TextBuffer::new(),
            index: MatchIndex::with_matcher(matcher.clone()),
            replacer: ReplaceEngine::with_index(MatchIndex::with_matcher(matcher)),
            projector: HighlightProjector::new(config.markers.clone()),
            navigator: MatchNavigator::new(),
            matches: None,
            phase: SearchPhase::Idle,
            viewport: Viewport::new(config.viewport_height, config.viewport_width)
                .with_margins(config.scroll),
        }
    }
}

impl<M: StringMatcher> SearchSession<M> {
    // ---- 入力（UI → エンジン） ----

    /// 編集によるテキスト変更
    ///
    /// 検索中であれば、直前に選択していた位置付近を保ったまま再計算する
    pub fn on_text_changed(&mut self, new_text: &str) {
        if new_text == self.buffer.get() {
            return;
        }
        self.buffer.set(new_text);
        self.refresh();
    }

    /// 新しいドキュメントを読み込む（検索状態は破棄）
    pub fn load_document(&mut self, text: &str) {
        self.buffer.set(text);
        self.clear_search();
        self.viewport.reset();
        log::info!("loaded document ({} bytes)", self.buffer.length());
    }

    /// 検索を実行しマッチ数を返す
    ///
    /// 空の検索語は検索の解除として扱う
    pub fn search(&mut self, term: &str) -> usize {
        if term.is_empty() {
            self.clear_search();
            return 0;
        }

        let matches = self.index.index(&self.buffer, term);
        let count = matches.len();
        self.navigator.reset(count);
        self.matches = Some(matches);
        self.phase = SearchPhase::Searched;
        self.scroll_to_current();
        count
    }

    /// 次のマッチへ移動
    pub fn next_match(&mut self) -> Option<usize> {
        self.ensure_fresh();
        let moved = self.navigator.next();
        self.after_move(moved)
    }

    /// 前のマッチへ移動
    pub fn previous_match(&mut self) -> Option<usize> {
        self.ensure_fresh();
        let moved = self.navigator.previous();
        self.after_move(moved)
    }

    /// 指定番号（0始まり）のマッチを選択
    pub fn select_match(&mut self, index: usize) -> Result<usize> {
        self.ensure_fresh();
        let selected = self.navigator.select(index)?;
        self.after_move(Some(selected));
        Ok(selected)
    }

    /// 現在のマッチを置換
    pub fn replace_current(&mut self, replacement: &str) -> Result<()> {
        self.ensure_fresh();
        let result = match self.try_replace_current(replacement) {
            Err(SearchError::StaleMatch { computed, current }) => {
                log::warn!("stale match set ({} vs {}), recomputing", computed, current);
                self.refresh();
                self.try_replace_current(replacement)
            }
            other => other,
        };

        match result {
            Ok(done) => {
                let resume_at = done.resume_at;
                self.apply_replacement(done);
                let offsets = self.matches.as_ref().map(MatchSet::offsets).unwrap_or(&[]);
                self.navigator.seek(offsets, resume_at);
                self.scroll_to_current();
                Ok(())
            }
            Err(err) => {
                if self.matches.is_some() {
                    self.phase = SearchPhase::Searched;
                }
                Err(err)
            }
        }
    }

    /// すべてのマッチを置換し、置換件数を返す
    pub fn replace_all(&mut self, replacement: &str) -> Result<usize> {
        let term = match &self.matches {
            Some(matches) => matches.term().to_string(),
            None => return Err(SearchError::EmptyTerm),
        };

        self.phase = SearchPhase::Replacing;
        let result = match self.replacer.replace_all(&mut self.buffer, &term, replacement) {
            Ok(result) => result,
            Err(err) => {
                self.phase = SearchPhase::Searched;
                return Err(err);
            }
        };
        let count = result.count;
        self.apply_replacement(result);
        self.navigator.reset(self.match_count());
        self.scroll_to_current();
        Ok(count)
    }

    /// 検索を解除
    pub fn clear_search(&mut self) {
        self.matches = None;
        self.navigator.clear();
        self.phase = SearchPhase::Idle;
    }

    /// 表示領域の寸法を更新
    pub fn set_viewport_size(&mut self, height: usize, width: usize) {
        self.viewport.set_dimensions(height, width);
        self.scroll_to_current();
    }

    // ---- 出力（エンジン → UI） ----

    /// マッチ数
    pub fn match_count(&self) -> usize {
        self.matches.as_ref().map(MatchSet::len).unwrap_or(0)
    }

    /// 現在のマッチ番号（0始まり）
    pub fn current_match(&self) -> Option<usize> {
        self.navigator.current()
    }

    /// 現在の検索語
    pub fn term(&self) -> Option<&str> {
        self.matches.as_ref().map(MatchSet::term)
    }

    /// 現在のマッチを括弧で囲んだ表示用テキスト
    pub fn current_highlighted_text(&self) -> String {
        self.highlight_view().into_string()
    }

    /// 表示用の投影
    ///
    /// 投影できない場合はマーカーなしの正規テキストを返す
    pub fn highlight_view(&self) -> HighlightView {
        let Some(matches) = &self.matches else {
            return HighlightView::plain(self.buffer.get());
        };

        self.projector
            .project(&self.buffer, matches, self.navigator.current())
            .unwrap_or_else(|err| {
                log::warn!("declined to highlight: {}", err);
                HighlightView::plain(self.buffer.get())
            })
    }

    /// すべてのマッチのハイライト範囲
    pub fn highlights(&self) -> Vec<SearchHighlight> {
        let Some(matches) = &self.matches else {
            return Vec::new();
        };

        self.projector
            .spans(&self.buffer, matches, self.navigator.current())
            .unwrap_or_else(|err| {
                log::warn!("declined to build highlight spans: {}", err);
                Vec::new()
            })
    }

    /// 現在のマッチの (行, 列)
    pub fn cursor_position(&self) -> Option<LineCol> {
        let offset = self.current_offset()?;
        to_line_col(self.buffer.get(), offset).ok()
    }

    /// 正規テキスト（保存やプレビュー描画用）
    pub fn canonical_text(&self) -> &str {
        self.buffer.get()
    }

    /// ステータス表示用の状態
    pub fn status(&self) -> SearchUiState {
        let Some(matches) = &self.matches else {
            return SearchUiState::idle();
        };

        let failed = matches.is_empty();
        let wrapped = !failed && self.navigator.wrapped();
        let (status, message) = if failed {
            (
                SearchStatus::NotFound,
                Some(format!("No occurrences of '{}' found.", matches.term())),
            )
        } else if wrapped {
            (SearchStatus::Wrapped, Some("Search wrapped.".to_string()))
        } else {
            (SearchStatus::Active, None)
        };

        SearchUiState {
            pattern: matches.term().to_string(),
            status,
            current_match: self.navigator.current().map(|idx| idx + 1),
            total_matches: matches.len(),
            wrapped,
            message,
        }
    }

    /// 文書統計
    pub fn stats(&self) -> DocumentStats {
        self.buffer.stats()
    }

    /// 現在のビューポート
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// 検索ライフサイクルの状態
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    // ---- 内部処理 ----

    fn try_replace_current(&mut self, replacement: &str) -> Result<Replacement> {
        let Some(matches) = &self.matches else {
            return Err(SearchError::NoMatchSelected);
        };
        self.phase = SearchPhase::Replacing;
        self.replacer
            .replace_current(&mut self.buffer, matches, self.navigator.current(), replacement)
    }

    fn apply_replacement(&mut self, replacement: Replacement) {
        log::debug!(
            "{} replacement(s), {} match(es) remain",
            replacement.count,
            replacement.matches.len()
        );
        self.matches = Some(replacement.matches);
        self.phase = SearchPhase::Searched;
    }

    fn after_move(&mut self, moved: Option<usize>) -> Option<usize> {
        if moved.is_some() {
            self.phase = SearchPhase::Navigating;
            self.scroll_to_current();
        }
        moved
    }

    /// マッチ集合が古ければ再計算する
    fn ensure_fresh(&mut self) {
        if let Some(matches) = &self.matches {
            if let Err(err) = matches.ensure_current(&self.buffer) {
                log::warn!("{}; recomputing", err);
                self.refresh();
            }
        }
    }

    /// 同じ検索語で再計算し、直前の選択位置以降のマッチを選び直す
    fn refresh(&mut self) {
        let Some(previous) = self.matches.take() else {
            return;
        };

        let anchor = self
            .navigator
            .current()
            .and_then(|idx| previous.get(idx))
            .unwrap_or(0);
        let fresh = self.index.index(&self.buffer, previous.term());
        self.navigator.seek(fresh.offsets(), anchor);
        self.matches = Some(fresh);
        self.phase = SearchPhase::Searched;
        self.scroll_to_current();
    }

    fn current_offset(&self) -> Option<usize> {
        self.matches.as_ref()?.get(self.navigator.current()?)
    }

    fn scroll_to_current(&mut self) {
        let Some(range) = self
            .navigator
            .current()
            .and_then(|idx| self.matches.as_ref()?.range(idx))
        else {
            return;
        };

        let text = self.buffer.get();
        let (Ok(pos), Ok(column), Some(matched)) = (
            to_line_col(text, range.start),
            display_column(text, range.start),
            text.get(range),
        ) else {
            return;
        };
        let width = matched.split('\n').next().unwrap_or("").width();
        self.viewport.ensure_visible(pos.line, column, width);
    }
}

impl Default for SearchSession<LiteralMatcher> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::HighlightMarkers;

    fn bracketed(text: &str) -> SearchSession {
        let config = EngineConfig {
            markers: HighlightMarkers {
                open: "[".to_string(),
                close: "]".to_string(),
            },
            ..EngineConfig::default()
        };
        let mut session = SearchSession::with_config(&config);
        session.load_document(text);
        session
    }

    #[test]
    fn search_selects_first_match() {
        let mut session = bracketed("foo bar foo");
        assert_eq!(session.search("foo"), 2);
        assert_eq!(session.current_match(), Some(0));
        assert_eq!(session.phase(), SearchPhase::Searched);
        assert_eq!(session.current_highlighted_text(), "[foo] bar foo");
        assert_eq!(session.canonical_text(), "foo bar foo");
    }

    #[test]
    fn empty_term_returns_to_idle() {
        let mut session = bracketed("abc");
        session.search("b");
        assert_eq!(session.search(""), 0);
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert_eq!(session.status(), SearchUiState::idle());
        assert_eq!(session.current_highlighted_text(), "abc");
    }

    #[test]
    fn navigation_moves_highlight_only() {
        let mut session = bracketed("a a a");
        session.search("a");
        assert_eq!(session.next_match(), Some(1));
        assert_eq!(session.phase(), SearchPhase::Navigating);
        assert_eq!(session.current_highlighted_text(), "a [a] a");
        assert_eq!(session.previous_match(), Some(0));
        assert_eq!(session.previous_match(), Some(2));
        assert!(session.status().wrapped);
        assert_eq!(session.canonical_text(), "a a a");
    }

    #[test]
    fn text_change_recomputes_matches() {
        let mut session = bracketed("one two one");
        session.search("one");
        session.next_match();
        session.on_text_changed("zero one two one");
        assert_eq!(session.match_count(), 2);
        assert_eq!(session.current_match(), Some(1));
        assert_eq!(session.current_highlighted_text(), "zero one two [one]");
    }

    #[test]
    fn replace_current_reselects_following_match() {
        let mut session = bracketed("cat cat cat");
        session.search("cat");
        session.next_match();
        session.replace_current("dog").unwrap();
        assert_eq!(session.canonical_text(), "cat dog cat");
        assert_eq!(session.match_count(), 2);
        assert_eq!(session.current_match(), Some(1));
        assert_eq!(session.current_highlighted_text(), "cat dog [cat]");
        assert_eq!(session.phase(), SearchPhase::Searched);
    }

    #[test]
    fn replace_current_without_search_fails() {
        let mut session = bracketed("abc");
        assert_eq!(session.replace_current("x"), Err(SearchError::NoMatchSelected));
        session.search("z");
        assert_eq!(session.replace_current("x"), Err(SearchError::NoMatchSelected));
        assert_eq!(session.canonical_text(), "abc");
        assert_eq!(session.phase(), SearchPhase::Searched);
    }

    #[test]
    fn replace_all_requires_term() {
        let mut session = bracketed("abc");
        assert_eq!(session.replace_all("x"), Err(SearchError::EmptyTerm));
    }

    #[test]
    fn status_reports_not_found() {
        let mut session = bracketed("abc");
        session.search("zz");
        let status = session.status();
        assert_eq!(status.status, SearchStatus::NotFound);
        assert_eq!(status.results_label(), "Results: 0");
        assert_eq!(status.message.as_deref(), Some("No occurrences of 'zz' found."));
        assert!(status.is_error());
    }

    #[test]
    fn cursor_position_follows_current_match() {
        let mut session = bracketed("ab\ncd\nxcd");
        session.search("cd");
        assert_eq!(session.cursor_position(), Some(LineCol::new(1, 0)));
        session.next_match();
        assert_eq!(session.cursor_position(), Some(LineCol::new(2, 1)));
    }

    #[test]
    fn load_document_resets_search() {
        let mut session = bracketed("abc");
        session.search("a");
        session.load_document("xyz");
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert_eq!(session.match_count(), 0);
        assert_eq!(session.cursor_position(), None);
        assert_eq!(session.stats().bytes, 3);
    }

    #[test]
    fn viewport_follows_far_match() {
        let text = format!("{}needle", "line\n".repeat(100));
        let mut session = bracketed(&text);
        session.set_viewport_size(10, 40);
        session.search("needle");
        assert!(session.viewport().top_line() <= 100);
        assert!(session.viewport().top_line() + session.viewport().height() > 100);
    }
}
