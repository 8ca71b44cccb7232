//! 行・列変換
//!
//! バイトオフセットを (行, 列) に変換する。カーソル配置とスクロール判定用

use unicode_width::UnicodeWidthStr;

use crate::error::{search::Result, SearchError};

/// 0始まりの行・列（列はバイト単位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

impl LineCol {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<LineCol> for (usize, usize) {
    fn from(pos: LineCol) -> Self {
        (pos.line, pos.column)
    }
}

/// オフセットを (行, 列) に変換
///
/// `offset == text.len()` は文書末尾として有効。それを超えると `OutOfRange`
pub fn to_line_col(text: &str, offset: usize) -> Result<LineCol> {
    let prefix = prefix(text, offset)?;
    let line = prefix.bytes().filter(|b| *b == b'\n').count();
    let column = match prefix.rfind('\n') {
        Some(nl) => offset - nl - 1,
        None => offset,
    };
    Ok(LineCol { line, column })
}

/// オフセットが属する行の先頭からの表示幅（端末セル数）
pub fn display_column(text: &str, offset: usize) -> Result<usize> {
    let prefix = prefix(text, offset)?;
    let line_start = prefix.rfind('\n').map(|nl| nl + 1).unwrap_or(0);
    Ok(prefix[line_start..].width())
}

fn prefix(text: &str, offset: usize) -> Result<&str> {
    // 文字境界でないオフセットも範囲外として扱う
    text.get(..offset).ok_or(SearchError::OutOfRange {
        offset,
        len: text.len(),
    })
}
