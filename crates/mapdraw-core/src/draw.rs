//! 宿主绘图工具的命令接口
//!
//! 控件与绘制模式只通过 [`DrawControl`] 访问要素存储，
//! 任何修改命令之后都重新读取当前状态，不依赖本地缓存的副本。

use crate::error::DrawError;
use crate::event::DrawEvent;
use crate::feature::{Feature, FeatureId};
use crate::geometry::LngLat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 交互模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    /// 整体选择要素
    #[default]
    SimpleSelect,
    /// 选择单个要素的顶点
    DirectSelect,
    /// 绘制折线
    DrawLineString,
}

impl ModeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeName::SimpleSelect => "simple_select",
            ModeName::DirectSelect => "direct_select",
            ModeName::DrawLineString => "draw_line_string",
        }
    }

    /// 该模式下是否允许编辑要素信息
    pub fn supports_editing(&self) -> bool {
        matches!(self, ModeName::SimpleSelect | ModeName::DirectSelect)
    }
}

/// 切换模式时的参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeOptions {
    /// simple_select: 要选中的要素
    pub feature_ids: Vec<FeatureId>,
    /// direct_select / draw_line_string: 目标要素
    pub feature_id: Option<FeatureId>,
    /// draw_line_string: 从该端点继续绘制已有的线
    pub from: Option<LngLat>,
    /// draw_line_string: 预先提供的名称
    pub feature_name: Option<String>,
    /// draw_line_string: 覆盖模式配置中的名称提示开关
    pub show_name_prompt: Option<bool>,
}

impl ModeOptions {
    pub fn select(feature_ids: Vec<FeatureId>) -> Self {
        Self {
            feature_ids,
            ..Default::default()
        }
    }

    pub fn direct(feature_id: FeatureId) -> Self {
        Self {
            feature_id: Some(feature_id),
            ..Default::default()
        }
    }
}

/// 待处理的模式切换
#[derive(Debug, Clone, PartialEq)]
pub struct ModeChange {
    pub mode: ModeName,
    pub options: ModeOptions,
}

/// 宿主绘图工具的命令接口
pub trait DrawControl {
    /// 按ID获取要素
    fn get(&self, id: &FeatureId) -> Option<Feature>;

    /// 获取全部要素
    fn get_all(&self) -> Vec<Feature>;

    /// 添加要素；ID已存在时替换
    fn add(&mut self, feature: Feature) -> Result<FeatureId, DrawError>;

    /// 删除要素
    fn delete(&mut self, ids: &[FeatureId]);

    /// 设置要素属性
    fn set_feature_property(&mut self, id: &FeatureId, key: &str, value: Value) -> Result<(), DrawError>;

    /// 切换交互模式
    fn change_mode(&mut self, mode: ModeName, options: ModeOptions);

    /// 当前选中的要素
    fn get_selected(&self) -> Vec<Feature>;

    /// 当前选中的顶点
    fn get_selected_points(&self) -> Vec<LngLat>;

    /// 当前交互模式
    fn get_mode(&self) -> ModeName;

    /// 合并两条线：删除 `absorbed`，写入 `merged` 并选中它
    ///
    /// 作为一次原子操作完成，并且只发出一个选择变化事件。
    fn join(&mut self, merged: Feature, absorbed: &FeatureId) -> Result<FeatureId, DrawError>;

    /// 在地图事件总线上发出事件
    fn fire(&mut self, event: DrawEvent);
}
