//! エンジン設定
//!
//! JSON形式の設定ファイルを読み込む。すべての項目に既定値があり、
//! ファイルが無い場合は既定値で動作する

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{config::Result, ConfigError};
use crate::search::HighlightMarkers;
use crate::ui::ScrollMargins;

/// 設定ファイルの場所を上書きする環境変数
pub const CONFIG_ENV: &str = "LEDA_CONFIG";

/// 検索・置換エンジンの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 現在のマッチを囲むマーカー
    pub markers: HighlightMarkers,
    /// スクロール余白
    pub scroll: ScrollMargins,
    /// 初期ビューポートの行数
    pub viewport_height: usize,
    /// 初期ビューポートの列数
    pub viewport_width: usize,
    /// ログレベル（"off", "error", "warn", "info", "debug", "trace"）
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            markers: HighlightMarkers::default(),
            scroll: ScrollMargins::default(),
            viewport_height: 24,
            viewport_width: 80,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// JSON文字列から読み込む
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::InvalidFile {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// ファイルから読み込む。ファイルが無ければ既定値
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// 既定の場所から読み込む
    pub fn load_default() -> Result<Self> {
        match Self::resolve_path()? {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// 設定ファイルの場所を決める
    ///
    /// `LEDA_CONFIG`（`~` と環境変数を展開）を優先し、無ければ
    /// `<config_dir>/leda/search.json`
    pub fn resolve_path() -> Result<Option<PathBuf>> {
        if let Ok(raw) = std::env::var(CONFIG_ENV) {
            return expand_path(&raw).map(Some);
        }
        Ok(dirs::config_dir().map(|dir| dir.join("leda").join("search.json")))
    }

    /// 設定値の検証
    pub fn validate(&self) -> Result<()> {
        if self.markers.open.is_empty() {
            return Err(invalid("markers.open", &self.markers.open));
        }
        if self.markers.close.is_empty() {
            return Err(invalid("markers.close", &self.markers.close));
        }
        if self.markers.open == self.markers.close {
            return Err(invalid("markers.close", &self.markers.close));
        }
        if self.viewport_height == 0 {
            return Err(invalid("viewport_height", "0"));
        }
        if self.viewport_width == 0 {
            return Err(invalid("viewport_width", "0"));
        }
        self.level_filter()?;
        Ok(())
    }

    /// ログレベルを `log` のフィルタに変換
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| invalid("log_level", &self.log_level))
    }
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| ConfigError::InvalidValue {
            key: CONFIG_ENV.to_string(),
            value: e.to_string(),
        })
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
