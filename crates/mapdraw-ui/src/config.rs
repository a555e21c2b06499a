//! 控件与绘制模式配置
//!
//! 配置使用 camelCase JSON，例如：
//!
//! ```json
//! {
//!   "lineControl": { "distanceUnits": "kilometers", "editProperties": [{ "name": "name", "label": "Name" }] },
//!   "namedLine": { "isNameRequired": true }
//! }
//! ```

use mapdraw_core::units::DistanceUnits;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 可编辑属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditProperty {
    /// 属性键
    pub name: String,
    /// 表单中显示的标签
    pub label: String,
}

impl EditProperty {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// 单个信息控件的配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlOptions {
    pub distance_units: DistanceUnits,
    /// 未设置时使用控件类型的默认标题
    pub default_title: Option<String>,
    pub edit_properties: Vec<EditProperty>,
}

impl ControlOptions {
    pub fn with_units(mut self, units: DistanceUnits) -> Self {
        self.distance_units = units;
        self
    }

    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = Some(title.into());
        self
    }

    pub fn with_edit_property(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.edit_properties.push(EditProperty::new(name, label));
        self
    }
}

/// 命名线绘制模式的配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamedLineConfig {
    /// 没有名称时不允许提交顶点
    pub is_name_required: bool,
    /// 进入模式时总是显示名称输入框
    pub show_name_prompt: bool,
}

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawConfig {
    pub line_control: Option<ControlOptions>,
    pub point_control: Option<ControlOptions>,
    pub multi_line_control: Option<ControlOptions>,
    pub named_line: NamedLineConfig,
}

impl DrawConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
