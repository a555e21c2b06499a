//! 绘制模式
//!
//! 每个模式是一个状态机：处理鼠标与按键，返回 [`ModeResult`] 告诉宿主是否切换模式。
//! 模式只在 `on_stop` 中把结果提交到存储。

mod draw_line_string;
mod name_prompt;
mod named_line;

pub use draw_line_string::{Direction, DrawLineString};
pub use name_prompt::NamePrompt;
pub use named_line::{NamedLineMode, Phase};

use egui::Key;
use mapdraw_core::draw::{DrawControl, ModeName, ModeOptions};
use mapdraw_core::error::DrawError;
use mapdraw_core::feature::FeatureId;
use mapdraw_core::geometry::LngLat;

/// 模式处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ModeResult {
    /// 保持当前模式
    Continue,
    /// 结束当前模式并切换
    ChangeMode(ModeName, ModeOptions),
}

impl ModeResult {
    /// 回到整体选择模式并选中 `ids`
    pub fn select(ids: Vec<FeatureId>) -> Self {
        ModeResult::ChangeMode(ModeName::SimpleSelect, ModeOptions::select(ids))
    }
}

/// 地图光标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// 添加顶点
    #[default]
    Add,
    /// 输入名称时
    Move,
    Pointer,
}

impl Cursor {
    pub fn to_egui(self) -> egui::CursorIcon {
        match self {
            Cursor::Add => egui::CursorIcon::Crosshair,
            Cursor::Move => egui::CursorIcon::Move,
            Cursor::Pointer => egui::CursorIcon::PointingHand,
        }
    }
}

/// 绘制模式
pub trait DrawMode {
    fn name(&self) -> ModeName;

    /// 鼠标移动
    fn on_mouse_move(&mut self, position: LngLat, draw: &mut dyn DrawControl) -> ModeResult;

    /// 在地图任意位置点击
    fn click_anywhere(&mut self, position: LngLat, draw: &mut dyn DrawControl) -> ModeResult;

    /// 地图上的按键
    fn on_key_up(&mut self, key: Key, draw: &mut dyn DrawControl) -> ModeResult;

    /// 离开模式，提交绘制结果
    ///
    /// 返回写入存储的要素ID；取消或结果无效时返回 `None`。
    fn on_stop(&mut self, draw: &mut dyn DrawControl) -> Result<Option<FeatureId>, DrawError>;

    fn cursor(&self) -> Cursor;
}
