//! 地图宿主
//!
//! 持有要素存储、已挂载的控件和当前绘制模式，把用户输入分发给它们，
//! 并在每次输入后把待处理的模式切换与事件处理完。

use crate::config::{DrawConfig, NamedLineConfig};
use crate::controls::{ControlInput, InfoControl};
use crate::modes::{Cursor, DrawMode, ModeResult, NamedLineMode};
use egui::Key;
use mapdraw_core::draw::{DrawControl, ModeChange, ModeName, ModeOptions};
use mapdraw_core::error::DrawError;
use mapdraw_core::event::{DrawEvent, EventKind};
use mapdraw_core::feature::FeatureId;
use mapdraw_core::geometry::LngLat;
use mapdraw_core::store::FeatureStore;
use tracing::{debug, warn};

/// 已挂载控件的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlHandle(usize);

#[derive(Debug)]
struct MountedControl {
    handle: ControlHandle,
    control: InfoControl,
    subscriptions: Vec<EventKind>,
}

/// 地图宿主
#[derive(Debug)]
pub struct MapHost {
    store: FeatureStore,
    controls: Vec<MountedControl>,
    next_handle: usize,
    line_config: NamedLineConfig,
    /// 当前的绘制模式
    drawing: Option<NamedLineMode>,
    /// 离开绘制模式后需要重新发布选择
    announce_selection: bool,
}

impl MapHost {
    pub fn new(store: FeatureStore, line_config: NamedLineConfig) -> Self {
        Self {
            store,
            controls: Vec::new(),
            next_handle: 0,
            line_config,
            drawing: None,
            announce_selection: false,
        }
    }

    /// 按配置挂载控件
    pub fn from_config(store: FeatureStore, config: &DrawConfig) -> Self {
        let mut host = Self::new(store, config.named_line);
        if let Some(options) = &config.line_control {
            host.add_control(InfoControl::line_string(options));
        }
        if let Some(options) = &config.point_control {
            host.add_control(InfoControl::point(options));
        }
        if let Some(options) = &config.multi_line_control {
            host.add_control(InfoControl::multi_line(options));
        }
        host
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FeatureStore {
        &mut self.store
    }

    pub fn line_config(&self) -> NamedLineConfig {
        self.line_config
    }

    pub fn control(&self, handle: ControlHandle) -> Option<&InfoControl> {
        self.controls
            .iter()
            .find(|mounted| mounted.handle == handle)
            .map(|mounted| &mounted.control)
    }

    pub fn control_mut(&mut self, handle: ControlHandle) -> Option<&mut InfoControl> {
        self.controls
            .iter_mut()
            .find(|mounted| mounted.handle == handle)
            .map(|mounted| &mut mounted.control)
    }

    pub fn controls(&self) -> impl Iterator<Item = (ControlHandle, &InfoControl)> {
        self.controls.iter().map(|mounted| (mounted.handle, &mounted.control))
    }

    pub fn drawing_mode(&self) -> Option<&NamedLineMode> {
        self.drawing.as_ref()
    }

    pub fn drawing_mode_mut(&mut self) -> Option<&mut NamedLineMode> {
        self.drawing.as_mut()
    }

    pub fn cursor(&self) -> Cursor {
        self.drawing.as_ref().map_or(Cursor::Pointer, |mode| mode.cursor())
    }

    // ========== 控件注册 ==========

    /// 挂载控件并订阅它关心的事件
    pub fn add_control(&mut self, mut control: InfoControl) -> ControlHandle {
        let handle = ControlHandle(self.next_handle);
        self.next_handle += 1;

        control.attach();
        let subscriptions = control.subscriptions();
        debug!(?handle, kind = ?control.kind(), "control added");
        self.controls.push(MountedControl {
            handle,
            control,
            subscriptions,
        });
        handle
    }

    /// 卸载控件，之后不再向它分发事件
    pub fn remove_control(&mut self, handle: ControlHandle) -> Option<InfoControl> {
        let index = self.controls.iter().position(|mounted| mounted.handle == handle)?;
        let mut mounted = self.controls.remove(index);
        mounted.control.detach();
        debug!(?handle, "control removed");
        Some(mounted.control)
    }

    // ========== 地图输入 ==========

    pub fn mouse_move(&mut self, position: LngLat) {
        if let Some(mode) = self.drawing.as_mut() {
            let result = mode.on_mouse_move(position, &mut self.store);
            self.apply_result(result);
        }
        self.pump();
    }

    pub fn click(&mut self, position: LngLat) {
        if let Some(mode) = self.drawing.as_mut() {
            let result = mode.click_anywhere(position, &mut self.store);
            self.apply_result(result);
        }
        self.pump();
    }

    /// 地图上的按键；绘制模式之外 Delete/Backspace 删除选中的要素
    pub fn key_up(&mut self, key: Key) {
        match self.drawing.as_mut() {
            Some(mode) => {
                let result = mode.on_key_up(key, &mut self.store);
                self.apply_result(result);
            }
            None if matches!(key, Key::Delete | Key::Backspace) => self.store.trash(),
            None => {}
        }
        self.pump();
    }

    pub fn name_prompt_input(&mut self, value: impl Into<String>) {
        if let Some(mode) = self.drawing.as_mut() {
            mode.set_name_input(value);
        }
    }

    pub fn submit_name(&mut self) {
        if let Some(mode) = self.drawing.as_mut() {
            mode.submit_name();
        }
        self.pump();
    }

    pub fn control_input(&mut self, handle: ControlHandle, input: ControlInput) {
        match self.controls.iter_mut().find(|mounted| mounted.handle == handle) {
            Some(mounted) => mounted.control.on_input(input, &mut self.store),
            None => debug!(?handle, "input for unknown control"),
        }
        self.pump();
    }

    // ========== 存储交互 ==========

    pub fn change_mode(&mut self, mode: ModeName, options: ModeOptions) {
        self.store.change_mode(mode, options);
        self.pump();
    }

    pub fn select(&mut self, ids: Vec<FeatureId>) {
        self.store.select(ids);
        self.pump();
    }

    pub fn select_vertex(&mut self, id: &FeatureId, index: usize) -> Result<(), DrawError> {
        self.store.select_vertex(id, index)?;
        self.pump();
        Ok(())
    }

    pub fn move_vertex(&mut self, id: &FeatureId, index: usize, to: LngLat) -> Result<(), DrawError> {
        self.store.move_vertex(id, index, to)?;
        self.pump();
        Ok(())
    }

    pub fn trash(&mut self) {
        self.store.trash();
        self.pump();
    }

    // ========== 分发 ==========

    /// 处理待切换的模式并按顺序分发事件，直到没有剩余
    pub fn pump(&mut self) {
        loop {
            if let Some(change) = self.store.take_mode_change() {
                self.apply_mode_change(change);
                continue;
            }
            let events = self.store.drain_events();
            if events.is_empty() {
                break;
            }
            for event in &events {
                self.dispatch(event);
            }
        }
    }

    fn dispatch(&mut self, event: &DrawEvent) {
        let kind = event.kind();
        for mounted in &mut self.controls {
            if mounted.subscriptions.contains(&kind) {
                mounted.control.on_event(event, &self.store);
            }
        }
    }

    fn apply_result(&mut self, result: ModeResult) {
        if let ModeResult::ChangeMode(mode, options) = result {
            // 先提交绘制结果，新的选择才能引用刚写入的要素
            self.stop_drawing();
            self.store.change_mode(mode, options);
        }
    }

    fn stop_drawing(&mut self) {
        if let Some(mut mode) = self.drawing.take() {
            if let Err(err) = mode.on_stop(&mut self.store) {
                warn!(%err, "failed to commit drawn line");
            }
            self.announce_selection = true;
        }
    }

    fn apply_mode_change(&mut self, change: ModeChange) {
        self.stop_drawing();
        self.store.fire(DrawEvent::ModeChange { mode: change.mode });

        if change.mode == ModeName::DrawLineString {
            match NamedLineMode::setup(self.line_config, &change.options, &self.store) {
                Ok(mode) => {
                    self.drawing = Some(mode);
                    self.announce_selection = false;
                }
                Err(err) => {
                    warn!(%err, "cannot enter line drawing");
                    self.store.change_mode(ModeName::SimpleSelect, ModeOptions::default());
                }
            }
        } else if std::mem::take(&mut self.announce_selection) {
            let features = self.store.get_selected();
            let points = self.store.get_selected_points();
            self.store.fire(DrawEvent::SelectionChange { features, points });
        }
    }
}
