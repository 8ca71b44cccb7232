//! leda - Search/replace engine for the Leda markdown editor
//!
//! 正規テキストと表示用ハイライトを分離した検索・置換・マッチ移動エンジン

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod buffer;
pub mod position;

// ロジック層
pub mod search;
pub mod session;

// 表示層
pub mod ui;

// 公開API
pub use buffer::{DocumentStats, Generation, TextBuffer};
pub use config::EngineConfig;
pub use error::{LedaError, Result, SearchError};
pub use position::{to_line_col, LineCol};
pub use search::{find_all, MatchSet, SearchPhase, SearchStatus, SearchUiState};
pub use session::SearchSession;
