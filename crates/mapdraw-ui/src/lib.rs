//! MapDraw 用户界面
//!
//! 地图上的要素信息/编辑控件与命名线绘制模式，基于egui渲染。
//!
//! # 架构设计
//!
//! - `InfoControl`: 显示选中要素的名称与长度，可选的工具栏和属性编辑表单
//! - `NamedLineMode`: 在折线绘制之上加名称输入的绘制模式
//! - `MapHost`: 持有要素存储，把输入与事件分发给控件和模式
//!
//! # 示例
//!
//! ```rust
//! use mapdraw_core::prelude::*;
//! use mapdraw_ui::{ControlOptions, InfoControl, MapHost, NamedLineConfig};
//!
//! let mut host = MapHost::new(FeatureStore::new(), NamedLineConfig::default());
//! let handle = host.add_control(InfoControl::line_string(&ControlOptions::default()));
//!
//! let line = Feature::line_string(vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 0.0)]);
//! let id = host.store_mut().add(line).unwrap();
//! host.select(vec![id]);
//! assert_eq!(host.control(handle).unwrap().panel().text(), "Line: 111.195 km");
//! ```

pub mod config;
pub mod controls;
pub mod host;
pub mod modes;
pub mod panel;

pub use config::{ConfigError, ControlOptions, DrawConfig, EditProperty, NamedLineConfig};
pub use controls::{ActionKind, ControlInput, ControlKind, EditForm, InfoControl, InfoPanel};
pub use host::{ControlHandle, MapHost};
pub use modes::{Cursor, DrawLineString, DrawMode, ModeResult, NamePrompt, NamedLineMode, Phase};
pub use panel::{show_info_control, show_name_prompt, show_overlays, PromptInput};
