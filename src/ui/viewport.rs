//! ビューポート管理
//!
//! 現在のマッチが画面内に収まるようスクロール位置を管理する。
//! 余白は設定値で、行・列の計算は `position` モジュールの結果を正とする

use serde::{Deserialize, Serialize};

/// スクロール時に確保する余白
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollMargins {
    /// 上下に確保する行数
    pub lines: usize,
    /// 左右に確保する列数
    pub columns: usize,
    /// 縦方向に画面外へ出たとき中央に表示するか
    pub center_vertically: bool,
}

impl Default for ScrollMargins {
    fn default() -> Self {
        Self {
            lines: 2,
            columns: 10,
            center_vertically: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// 表示の開始行
    top_line: usize,
    /// 水平スクロール位置（表示列単位）
    scroll_x: usize,
    /// 表示可能な行数
    height: usize,
    /// 表示可能な列数
    width: usize,
    margins: ScrollMargins,
}

impl Viewport {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            top_line: 0,
            scroll_x: 0,
            height: height.max(1),
            width: width.max(1),
            margins: ScrollMargins::default(),
        }
    }

    pub fn with_margins(mut self, margins: ScrollMargins) -> Self {
        self.margins = margins;
        self
    }

    /// ビューポートの寸法を更新
    pub fn set_dimensions(&mut self, height: usize, width: usize) {
        self.height = height.max(1);
        self.width = width.max(1);
    }

    /// 先頭へ戻す
    pub fn reset(&mut self) {
        self.top_line = 0;
        self.scroll_x = 0;
    }

    /// 指定位置から `match_width` 列分が画面内に収まるようスクロールする
    ///
    /// 戻り値はスクロールが発生したかどうか
    pub fn ensure_visible(&mut self, line: usize, column: usize, match_width: usize) -> bool {
        let vertical = self.scroll_vertically(line);
        let horizontal = self.scroll_horizontally(column, match_width);
        vertical || horizontal
    }

    fn scroll_vertically(&mut self, line: usize) -> bool {
        let margin = self.margins.lines.min(self.height.saturating_sub(1) / 2);
        let upper = self.top_line + margin;
        let lower = self.top_line + self.height - 1 - margin;

        if line >= upper && line <= lower {
            return false;
        }

        let previous = self.top_line;
        let outside = line < self.top_line || line >= self.top_line + self.height;
        if outside && self.margins.center_vertically {
            self.top_line = line.saturating_sub(self.height / 2);
        } else if line < upper {
            self.top_line = line.saturating_sub(margin);
        } else {
            self.top_line = (line + margin + 1).saturating_sub(self.height);
        }
        self.top_line != previous
    }

    fn scroll_horizontally(&mut self, column: usize, match_width: usize) -> bool {
        let margin = self.margins.columns.min(self.width.saturating_sub(1) / 2);
        let previous = self.scroll_x;

        if column + match_width + margin > self.scroll_x + self.width {
            self.scroll_x = (column + match_width + margin).saturating_sub(self.width);
        }
        // マッチの先頭は常に見えるようにする
        if column < self.scroll_x + margin {
            self.scroll_x = column.saturating_sub(margin);
        }
        self.scroll_x != previous
    }

    /// 現在の表示開始行を取得
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// 水平スクロール位置を取得
    pub fn scroll_x(&self) -> usize {
        self.scroll_x
    }

    /// 表示領域の高さを取得
    pub fn height(&self) -> usize {
        self.height
    }

    /// 表示領域の幅を取得
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn margins(&self) -> ScrollMargins {
        self.margins
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(24, 80)
    }
}
