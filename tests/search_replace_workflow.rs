use leda::buffer::TextBuffer;
use leda::config::EngineConfig;
use leda::search::{HighlightMarkers, HighlightProjector, MatchIndex, ReplaceEngine, SearchStatus};
use leda::{LineCol, SearchError, SearchPhase, SearchSession};

fn session_with(text: &str) -> SearchSession {
    let config = EngineConfig {
        markers: HighlightMarkers {
            open: "<".to_string(),
            close: ">".to_string(),
        },
        ..EngineConfig::default()
    };
    let mut session = SearchSession::with_config(&config);
    session.load_document(text);
    session
}

#[test]
fn search_navigate_replace_flow() {
    let mut session = session_with("foo bar foo\nbaz foo");
    assert_eq!(session.search("foo"), 3);
    assert_eq!(session.status().results_label(), "Results: 3");
    assert_eq!(session.current_highlighted_text(), "<foo> bar foo\nbaz foo");

    session.next_match();
    session.next_match();
    assert_eq!(session.cursor_position(), Some(LineCol::new(1, 4)));
    assert_eq!(session.current_highlighted_text(), "foo bar foo\nbaz <foo>");

    session.replace_current("qux").unwrap();
    assert_eq!(session.canonical_text(), "foo bar foo\nbaz qux");
    assert_eq!(session.match_count(), 2);
    // 末尾を置換したので先頭へ折り返す
    assert_eq!(session.current_match(), Some(0));
    assert_eq!(session.status().status, SearchStatus::Wrapped);

    assert_eq!(session.replace_all(""), Ok(2));
    assert_eq!(session.canonical_text(), " bar \nbaz qux");
    assert_eq!(session.match_count(), 0);
    assert_eq!(session.status().status, SearchStatus::NotFound);

    session.clear_search();
    assert_eq!(session.phase(), SearchPhase::Idle);
    assert_eq!(session.current_highlighted_text(), " bar \nbaz qux");
}

#[test]
fn highlight_never_leaks_into_canonical_text() {
    let mut session = session_with("ab ab ab");
    session.search("ab");
    for _ in 0..5 {
        session.next_match();
        let _ = session.current_highlighted_text();
    }
    assert_eq!(session.canonical_text(), "ab ab ab");

    // 括弧付き表示から検索し直しても結果は変わらない
    assert_eq!(session.search("ab"), 3);
    session.replace_current("x").unwrap();
    assert_eq!(session.canonical_text(), "x ab ab");
}

#[test]
fn full_cycle_of_next_returns_to_start() {
    let mut session = session_with("a.b.c.d.e");
    let count = session.search(".");
    assert_eq!(count, 4);
    session.next_match();
    let start = session.current_match();
    for _ in 0..count {
        session.next_match();
    }
    assert_eq!(session.current_match(), start);
}

#[test]
fn replace_current_on_empty_match_set_leaves_document() {
    let mut session = session_with("nothing here");
    session.search("absent");
    assert_eq!(session.replace_current("x"), Err(SearchError::NoMatchSelected));
    assert_eq!(session.canonical_text(), "nothing here");
}

#[test]
fn editing_while_searching_keeps_offsets_valid() {
    let mut session = session_with("key = 1\nkey = 2");
    session.search("key");
    session.next_match();

    session.on_text_changed("key = 1\n");
    assert_eq!(session.match_count(), 1);
    assert_eq!(session.current_match(), Some(0));
    session.replace_current("id").unwrap();
    assert_eq!(session.canonical_text(), "id = 1\n");
}

#[test]
fn components_reject_stale_match_sets() {
    let mut buffer = TextBuffer::from_str("alpha beta alpha");
    let set = MatchIndex::new().index(&buffer, "alpha");
    buffer.set("beta alpha");

    let projector = HighlightProjector::default();
    assert!(matches!(
        projector.project(&buffer, &set, Some(1)),
        Err(SearchError::StaleMatch { .. })
    ));
    assert!(matches!(
        ReplaceEngine::new().replace_current(&mut buffer, &set, Some(0), "x"),
        Err(SearchError::StaleMatch { .. })
    ));
    assert_eq!(buffer.get(), "beta alpha");
}

#[test]
fn spec_examples_hold() {
    assert_eq!(leda::find_all("aaaa", "aa"), vec![0, 2]);
    assert_eq!(leda::find_all("hello world", "o"), vec![4, 7]);
    assert_eq!(leda::to_line_col("ab\ncd", 3), Ok(LineCol::new(1, 0)));
    assert_eq!(leda::to_line_col("ab\ncd", 0), Ok(LineCol::new(0, 0)));

    let mut buffer = TextBuffer::from_str("foo bar foo");
    let result = ReplaceEngine::new().replace_all(&mut buffer, "foo", "").unwrap();
    assert_eq!(result.count, 2);
    assert_eq!(buffer.get(), " bar ");
}
