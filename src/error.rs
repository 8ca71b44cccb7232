//! エラーハンドリングシステム
//!
//! 検索・置換エンジン全体で使用される統一されたエラー型とユーティリティを定義
//! どのエラーもプロセスにとって致命的ではなく、再検索で回復できる

use std::time::{Duration, Instant};
use thiserror::Error;

use crate::buffer::Generation;

/// クレート全体のエラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedaError {
    /// 検索・置換操作エラー
    #[error("Search operation failed: {0}")]
    Search(#[from] SearchError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// 検索・置換固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// 検索語が空のまま置換しようとした
    #[error("Search term is empty")]
    EmptyTerm,

    /// 選択中のマッチが無い
    #[error("No match selected")]
    NoMatchSelected,

    /// マッチ集合が現在のドキュメントと一致しない（内部用、再計算で回復）
    #[error("Match set from generation {computed} is stale against generation {current}")]
    StaleMatch {
        computed: Generation,
        current: Generation,
    },

    /// オフセット計算が範囲外
    #[error("Offset {offset} is out of range for length {len}")]
    OutOfRange { offset: usize, len: usize },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
}

/// ステータス表示用のエラー情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// 表示メッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間
    pub duration: Duration,
}

impl ErrorDisplay {
    pub fn new(error: &LedaError) -> Self {
        let (message, level) = Self::format_error(error);
        Self {
            message,
            level,
            start_time: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    fn format_error(error: &LedaError) -> (String, ErrorLevel) {
        match error {
            LedaError::Search(SearchError::EmptyTerm) => {
                ("Enter a search term.".to_string(), ErrorLevel::Info)
            }
            LedaError::Search(SearchError::NoMatchSelected) => {
                ("No match selected.".to_string(), ErrorLevel::Info)
            }
            LedaError::Search(SearchError::StaleMatch { .. }) => (
                "Document changed; search results were refreshed.".to_string(),
                ErrorLevel::Warning,
            ),
            LedaError::Search(SearchError::OutOfRange { .. }) => (
                "Match is no longer valid. Search again.".to_string(),
                ErrorLevel::Error,
            ),
            LedaError::Config(err) => (format!("Configuration error: {}", err), ErrorLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

impl From<&SearchError> for ErrorDisplay {
    fn from(error: &SearchError) -> Self {
        ErrorDisplay::new(&LedaError::Search(error.clone()))
    }
}

// std::io::Error から ConfigError への変換
impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Io {
            message: error.to_string(),
        }
    }
}

impl From<std::io::Error> for LedaError {
    fn from(error: std::io::Error) -> Self {
        LedaError::Config(error.into())
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, LedaError>;

/// 各モジュール固有のResult型
pub mod search {
    pub type Result<T> = std::result::Result<T, super::SearchError>;
}

pub mod config {
    pub type Result<T> = std::result::Result<T, super::ConfigError>;
}
