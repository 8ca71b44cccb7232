//! 正規テキストバッファ
//!
//! ドキュメント内容の唯一の情報源。変更は常に全体置換で行い、
//! 変更のたびに世代を進めて派生データ（マッチ集合）を無効化する

use std::fmt;

/// ドキュメントの世代
///
/// 変更ごとに増加するリビジョンと、その時点のバイト長の組
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation {
    revision: u64,
    len: usize,
}

impl Generation {
    /// リビジョン番号
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 計算時点のバイト長
    pub fn len(&self) -> usize {
        self.len
    }

    /// 計算時点で空だったか
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}/{}B", self.revision, self.len)
    }
}

/// ステータス表示用の文書統計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    /// バイト数
    pub bytes: usize,
    /// 文字数
    pub chars: usize,
    /// 行数（改行数 + 1）
    pub lines: usize,
}

impl DocumentStats {
    pub fn of(text: &str) -> Self {
        Self {
            bytes: text.len(),
            chars: text.chars().count(),
            lines: text.matches('\n').count() + 1,
        }
    }
}

/// 正規テキストを保持するバッファ
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    revision: u64,
}

impl TextBuffer {
    /// 空のバッファを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列からバッファを作成
    pub fn from_str(text: &str) -> Self {
        Self {
            text: text.to_string(),
            revision: 0,
        }
    }

    /// 現在の正規テキスト
    pub fn get(&self) -> &str {
        &self.text
    }

    /// 内容を全体置換する
    ///
    /// それまでに計算したすべてのマッチ集合は無効になる
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision = self.revision.wrapping_add(1);
        log::trace!("buffer set to {} bytes, {}", self.text.len(), self.generation());
    }

    /// バイト長
    pub fn length(&self) -> usize {
        self.text.len()
    }

    /// 空か判定
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 現在の世代
    pub fn generation(&self) -> Generation {
        Generation {
            revision: self.revision,
            len: self.text.len(),
        }
    }

    /// 文書統計
    pub fn stats(&self) -> DocumentStats {
        DocumentStats::of(&self.text)
    }
}
