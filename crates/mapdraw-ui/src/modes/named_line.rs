//! 命名线绘制模式
//!
//! 在折线绘制之上加一个名称输入框：需要名称时先输入名称再绘制，
//! 绘制过程中发出 `LineProgress` 事件，停止时把名称写入新线。

use super::{Cursor, DrawLineString, DrawMode, ModeResult, NamePrompt};
use crate::config::NamedLineConfig;
use egui::Key;
use mapdraw_core::draw::{DrawControl, ModeName, ModeOptions};
use mapdraw_core::error::DrawError;
use mapdraw_core::event::DrawEvent;
use mapdraw_core::feature::{FeatureId, FeatureState, NAME_PROPERTY};
use mapdraw_core::geometry::LngLat;
use serde_json::Value;
use tracing::debug;

/// 模式所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 正在添加顶点
    CollectingPoints,
    /// 名称输入框打开
    AwaitingName,
    /// 已离开模式
    Stopped,
}

/// 命名线绘制模式
#[derive(Debug)]
pub struct NamedLineMode {
    config: NamedLineConfig,
    base: DrawLineString,
    /// 进入模式时的绘制状态，名称提交后从它重新开始
    initial: DrawLineString,
    name: Option<String>,
    prompt: Option<NamePrompt>,
    cursor: Cursor,
    stopped: bool,
}

impl NamedLineMode {
    pub fn setup(config: NamedLineConfig, options: &ModeOptions, draw: &dyn DrawControl) -> Result<Self, DrawError> {
        let base = DrawLineString::setup(options, draw)?;
        let name = options.feature_name.clone().filter(|name| !name.is_empty());
        let show_prompt = options.show_name_prompt.unwrap_or(config.show_name_prompt)
            || (config.is_name_required && name.is_none());

        let prompt = show_prompt.then(|| NamePrompt::open(name.as_deref()));
        let cursor = if prompt.is_some() { Cursor::Move } else { Cursor::Add };
        debug!(show_prompt, required = config.is_name_required, "named line mode entered");

        Ok(Self {
            config,
            initial: base.clone(),
            base,
            name,
            prompt,
            cursor,
            stopped: false,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.stopped {
            Phase::Stopped
        } else if self.prompt.is_some() {
            Phase::AwaitingName
        } else {
            Phase::CollectingPoints
        }
    }

    pub fn config(&self) -> NamedLineConfig {
        self.config
    }

    /// 已记录的名称
    pub fn feature_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn base(&self) -> &DrawLineString {
        &self.base
    }

    pub fn prompt(&self) -> Option<&NamePrompt> {
        self.prompt.as_ref()
    }

    pub fn prompt_mut(&mut self) -> Option<&mut NamePrompt> {
        self.prompt.as_mut()
    }

    /// 修改名称输入框的内容
    pub fn set_name_input(&mut self, value: impl Into<String>) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.set_value(value);
        }
    }

    /// 提交名称（Create 按钮或回车）
    ///
    /// 名称为空时保持输入框打开并重新聚焦。返回是否接受了名称。
    pub fn submit_name(&mut self) -> bool {
        let Some(prompt) = self.prompt.as_mut() else {
            return false;
        };
        if prompt.value().is_empty() {
            prompt.request_focus();
            return false;
        }
        self.name = Some(prompt.value().to_string());
        self.start_draw();
        true
    }

    /// 关闭输入框，保留已记录的名称
    pub fn close_prompt(&mut self) {
        if self.prompt.take().is_some() {
            self.cursor = Cursor::Add;
        }
    }

    fn start_draw(&mut self) {
        self.base = self.initial.clone();
        self.cursor = Cursor::Add;
        self.prompt = None;
        debug!(name = ?self.name, "named line drawing started");
    }

    fn needs_name(&self) -> bool {
        self.config.is_name_required && self.name.is_none()
    }
}

impl DrawMode for NamedLineMode {
    fn name(&self) -> ModeName {
        ModeName::DrawLineString
    }

    fn on_mouse_move(&mut self, position: LngLat, draw: &mut dyn DrawControl) -> ModeResult {
        let result = self.base.on_mouse_move(position, draw);
        if self.base.coordinates().len() > 1 {
            draw.fire(DrawEvent::LineProgress {
                feature: self.base.line().clone(),
                state: FeatureState {
                    name: self.name.clone(),
                },
            });
        }
        result
    }

    fn click_anywhere(&mut self, position: LngLat, draw: &mut dyn DrawControl) -> ModeResult {
        if self.needs_name() {
            debug!("name required before drawing");
            return ModeResult::ChangeMode(ModeName::SimpleSelect, ModeOptions::default());
        }
        self.close_prompt();
        self.base.click_anywhere(position, draw)
    }

    fn on_key_up(&mut self, key: Key, draw: &mut dyn DrawControl) -> ModeResult {
        if self.prompt.is_none() {
            return self.base.on_key_up(key, draw);
        }
        match key {
            Key::Enter => {
                self.submit_name();
            }
            Key::Escape => self.close_prompt(),
            _ => {}
        }
        ModeResult::Continue
    }

    fn on_stop(&mut self, draw: &mut dyn DrawControl) -> Result<Option<FeatureId>, DrawError> {
        if self.stopped {
            return Ok(None);
        }
        self.stopped = true;
        self.prompt = None;

        let committed = self.base.on_stop(draw)?;
        if let (Some(id), Some(name)) = (committed.as_ref(), self.name.as_ref()) {
            draw.set_feature_property(id, NAME_PROPERTY, Value::String(name.clone()))?;
        }
        Ok(committed)
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }
}
