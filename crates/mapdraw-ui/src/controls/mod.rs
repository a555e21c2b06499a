//! 要素信息/编辑控件
//!
//! 三种控件共用同一个 [`InfoControl`]，由 [`ControlKind`] 决定支持哪些要素组合、
//! 默认标题和工具栏动作。配置了可编辑属性时，控件额外带一个 [`EditForm`]。
//!
//! 事件处理遵循“先清空再设置”：同一次处理中清空总是先于重新渲染。

pub mod edit_form;
mod line_string;
mod multi_line;

pub use edit_form::{ActionKind, EditForm, FormInput};
pub use line_string::{
    add_point_to_line, duplicate_line, extend_line_string, insert_point_into_line, split_line,
    split_selected_line,
};
pub use multi_line::{join_lines, order_for_join};

use crate::config::ControlOptions;
use egui::Key;
use mapdraw_core::draw::DrawControl;
use mapdraw_core::error::DrawError;
use mapdraw_core::event::{DrawEvent, EventKind, UpdateAction};
use mapdraw_core::feature::{Feature, FeatureState, NAME_PROPERTY};
use mapdraw_core::geometry::lines_length;
use mapdraw_core::units::DistanceUnits;
use serde_json::Value;
use tracing::{debug, warn};

const TITLE_LINE: &str = "Line";
const TITLE_POINT: &str = "Point";
const TITLE_MULTIPLE_LINES: &str = "Multiple lines";

/// 控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// 恰好一条线
    LineString,
    /// 恰好一个点
    Point,
    /// 恰好两条线
    MultiLine,
}

impl ControlKind {
    /// 该控件是否处理这组要素
    pub fn is_supported_features(&self, features: &[Feature]) -> bool {
        match self {
            ControlKind::LineString => features.len() == 1 && features[0].is_line_string(),
            ControlKind::Point => features.len() == 1 && features[0].is_point(),
            ControlKind::MultiLine => features.len() == 2 && features.iter().all(Feature::is_line_string),
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            ControlKind::LineString => TITLE_LINE,
            ControlKind::Point => TITLE_POINT,
            ControlKind::MultiLine => TITLE_MULTIPLE_LINES,
        }
    }

    /// 工具栏动作
    pub fn toolbar(&self) -> Vec<ActionKind> {
        match self {
            ControlKind::LineString => vec![
                ActionKind::EditInfo,
                ActionKind::Duplicate,
                ActionKind::AddPoint,
                ActionKind::SplitLine,
            ],
            ControlKind::Point => vec![ActionKind::EditInfo],
            ControlKind::MultiLine => vec![ActionKind::JoinLines],
        }
    }

    /// 订阅的事件
    pub fn subscriptions(&self) -> Vec<EventKind> {
        let mut kinds = vec![
            EventKind::Create,
            EventKind::Update,
            EventKind::SelectionChange,
            EventKind::Delete,
        ];
        if *self == ControlKind::LineString {
            kinds.push(EventKind::LineProgress);
        }
        kinds
    }
}

/// 控件在地图上显示的面板
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPanel {
    visible: bool,
    text: String,
}

impl InfoPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 用户对控件的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlInput {
    /// 点击工具栏按钮
    Action(ActionKind),
    /// 修改输入框
    SetValue { name: String, value: String },
    /// 输入框中的按键
    KeyUp(Key),
    /// OK 按钮
    Confirm,
    /// Cancel 按钮
    Cancel,
}

/// 要素信息控件
#[derive(Debug, Clone)]
pub struct InfoControl {
    kind: ControlKind,
    distance_units: DistanceUnits,
    default_title: String,
    panel: InfoPanel,
    /// 配置了可编辑属性时才有
    edit: Option<EditForm>,
    attached: bool,
}

impl InfoControl {
    pub fn new(kind: ControlKind, options: &ControlOptions) -> Self {
        let default_title = options
            .default_title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| kind.default_title().to_string());
        let edit = (!options.edit_properties.is_empty())
            .then(|| EditForm::new(&options.edit_properties, kind.toolbar()));

        Self {
            kind,
            distance_units: options.distance_units,
            default_title,
            panel: InfoPanel::default(),
            edit,
            attached: false,
        }
    }

    pub fn line_string(options: &ControlOptions) -> Self {
        Self::new(ControlKind::LineString, options)
    }

    pub fn point(options: &ControlOptions) -> Self {
        Self::new(ControlKind::Point, options)
    }

    pub fn multi_line(options: &ControlOptions) -> Self {
        Self::new(ControlKind::MultiLine, options)
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn distance_units(&self) -> DistanceUnits {
        self.distance_units
    }

    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn edit_form(&self) -> Option<&EditForm> {
        self.edit.as_ref()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut EditForm> {
        self.edit.as_mut()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// 挂载到地图，返回根面板
    pub fn attach(&mut self) -> &InfoPanel {
        self.clear_features();
        self.attached = true;
        debug!(kind = ?self.kind, "info control attached");
        &self.panel
    }

    /// 从地图卸载
    pub fn detach(&mut self) {
        self.clear_features();
        if let Some(form) = self.edit.as_mut() {
            form.hide_toolbar();
        }
        self.attached = false;
        debug!(kind = ?self.kind, "info control detached");
    }

    pub fn subscriptions(&self) -> Vec<EventKind> {
        self.kind.subscriptions()
    }

    pub fn is_supported_features(&self, features: &[Feature]) -> bool {
        self.kind.is_supported_features(features)
    }

    /// 要素名称
    ///
    /// 提供了临时状态（尚未提交的要素）时从状态读取，否则读取存储中的属性。
    pub fn feature_name(
        &self,
        feature: &Feature,
        state: Option<&FeatureState>,
        draw: &dyn DrawControl,
    ) -> Option<String> {
        match state {
            Some(state) => state.name.clone(),
            None => draw
                .get(&feature.id)
                .and_then(|stored| stored.name().map(str::to_string))
                .or_else(|| feature.name().map(str::to_string)),
        }
    }

    /// 面板标题
    ///
    /// 单个要素显示名称（没有则显示默认标题），多个要素显示默认标题；
    /// 全部是线且启用了距离单位时追加总长度。
    pub fn features_title(
        &self,
        features: &[Feature],
        state: Option<&FeatureState>,
        draw: &dyn DrawControl,
    ) -> String {
        let all_lines = !features.is_empty() && features.iter().all(Feature::is_line_string);
        let line_distance = if all_lines && self.distance_units.is_enabled() {
            lines_length(features.iter().filter_map(Feature::line_coordinates), self.distance_units)
        } else {
            0.0
        };

        let title = if features.len() == 1 {
            self.feature_name(&features[0], state, draw)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.default_title.clone())
        } else {
            self.default_title.clone()
        };

        if !title.is_empty() && line_distance > 0.0 {
            format!("{title}: {}", self.distance_units.format_length(line_distance))
        } else {
            title
        }
    }

    // ========== 事件处理 ==========

    pub fn on_event(&mut self, event: &DrawEvent, draw: &dyn DrawControl) {
        if !self.attached {
            return;
        }
        match event {
            DrawEvent::Create { features } => {
                if self.is_supported_features(features) {
                    self.clear_features();
                    self.set_features(features, None, draw);
                }
            }
            DrawEvent::Update { features, action } => {
                if *action == UpdateAction::ChangeCoordinates && self.is_supported_features(features) {
                    self.clear_features();
                    self.set_features(features, None, draw);
                }
            }
            DrawEvent::SelectionChange { features, .. } => {
                self.clear_features();
                if self.is_supported_features(features) {
                    self.set_features(features, None, draw);
                }
            }
            DrawEvent::Delete { .. } => self.clear_features(),
            DrawEvent::LineProgress { feature, state } => {
                if self.kind == ControlKind::LineString {
                    self.clear_features();
                    self.set_features(std::slice::from_ref(feature), Some(state), draw);
                }
            }
            DrawEvent::ModeChange { .. } => {}
        }
    }

    pub fn on_input(&mut self, input: ControlInput, draw: &mut dyn DrawControl) {
        if !self.attached {
            return;
        }
        match input {
            ControlInput::Action(action) => self.on_action(action, draw),
            ControlInput::SetValue { name, value } => {
                if let Some(form) = self.edit.as_mut() {
                    form.set_value(&name, value);
                }
            }
            ControlInput::KeyUp(Key::Enter) => {
                if self.is_editing() {
                    self.save_and_stop_editing(draw);
                }
            }
            ControlInput::KeyUp(Key::Escape) | ControlInput::Cancel => {
                let show_toolbar = draw.get_mode().supports_editing();
                if let Some(form) = self.edit.as_mut() {
                    form.stop_editing(show_toolbar);
                }
            }
            ControlInput::KeyUp(_) => {}
            ControlInput::Confirm => {
                if self.is_editing() {
                    self.save_and_stop_editing(draw);
                }
            }
        }
    }

    fn is_editing(&self) -> bool {
        self.edit.as_ref().is_some_and(EditForm::is_form_visible)
    }

    fn on_action(&mut self, action: ActionKind, draw: &mut dyn DrawControl) {
        if !self.edit.as_ref().is_some_and(|form| form.has_action(action)) {
            debug!(?action, kind = ?self.kind, "action not available on this control");
            return;
        }

        let result = match action {
            ActionKind::EditInfo => {
                self.show_edit_form(&*draw);
                if let Some(form) = self.edit.as_mut() {
                    form.hide_toolbar();
                }
                Ok(())
            }
            ActionKind::Duplicate => duplicate_line(draw).map(|created| {
                if created.is_some() {
                    self.refresh_from_selection(&*draw);
                }
            }),
            ActionKind::AddPoint => add_point_to_line(draw).map(|inserted| {
                if inserted {
                    self.refresh_from_selection(&*draw);
                }
            }),
            ActionKind::SplitLine => split_selected_line(draw).map(|created| {
                if created.is_some() {
                    self.refresh_from_selection(&*draw);
                }
            }),
            ActionKind::JoinLines => join_lines(draw).map(|_| ()),
        };

        if let Err(err) = result {
            warn!(?action, %err, "edit action failed");
        }
    }

    // ========== 显示 ==========

    /// 隐藏面板；打开的编辑表单随之关闭
    pub fn clear_features(&mut self) {
        self.panel.visible = false;
        self.panel.text.clear();
        if let Some(form) = self.edit.as_mut() {
            form.hide_edit_form();
        }
    }

    pub fn set_features(&mut self, features: &[Feature], state: Option<&FeatureState>, draw: &dyn DrawControl) {
        self.set_features_text(features, state, draw);
        self.panel.visible = true;

        let single = if features.len() == 1 { features.first() } else { None };
        let name = single.and_then(|feature| self.feature_name(feature, state, draw));

        if let Some(form) = self.edit.as_mut() {
            form.hide_edit_form();
            if draw.get_mode().supports_editing() {
                form.show_toolbar();
            } else {
                form.hide_toolbar();
            }
            form.fill(|key| {
                if key == NAME_PROPERTY {
                    return name.clone().unwrap_or_default();
                }
                single
                    .and_then(|feature| {
                        draw.get(&feature.id)
                            .and_then(|stored| stored.property_text(key))
                            .or_else(|| feature.property_text(key))
                    })
                    .unwrap_or_default()
            });
        }
    }

    fn set_features_text(&mut self, features: &[Feature], state: Option<&FeatureState>, draw: &dyn DrawControl) {
        self.panel.text = self.features_title(features, state, draw);
    }

    /// 按当前选择重新渲染
    fn refresh_from_selection(&mut self, draw: &dyn DrawControl) {
        self.clear_features();
        let selected = draw.get_selected();
        if self.is_supported_features(&selected) {
            self.set_features(&selected, None, draw);
        }
    }

    // ========== 编辑表单 ==========

    /// 打开编辑表单，用当前选中要素的属性预填
    pub fn show_edit_form(&mut self, draw: &dyn DrawControl) {
        let selected = draw.get_selected();
        let single = if selected.len() == 1 { selected.first() } else { None };
        if let Some(form) = self.edit.as_mut() {
            form.fill(|key| single.and_then(|f| f.property_text(key)).unwrap_or_default());
            form.show_edit_form();
        }
    }

    pub fn hide_edit_form(&mut self) {
        if let Some(form) = self.edit.as_mut() {
            form.hide_edit_form();
        }
    }

    /// 把表单中的值写入全部选中的要素
    ///
    /// 先确认所有要素仍然存在再写入，不会只写一部分。
    pub fn save_edit_form(&mut self, draw: &mut dyn DrawControl) -> Result<(), DrawError> {
        let Some(form) = self.edit.as_ref() else {
            return Ok(());
        };
        let values = form.values();
        let state = form.value(NAME_PROPERTY).map(FeatureState::named);

        let selected = draw.get_selected();
        if let Some(missing) = selected.iter().find(|f| draw.get(&f.id).is_none()) {
            return Err(DrawError::FeatureNotFound(missing.id.clone()));
        }
        for feature in &selected {
            for (key, value) in &values {
                draw.set_feature_property(&feature.id, key, Value::String(value.clone()))?;
            }
        }
        debug!(count = selected.len(), "feature properties saved");

        self.set_features_text(&selected, state.as_ref(), &*draw);
        Ok(())
    }

    fn save_and_stop_editing(&mut self, draw: &mut dyn DrawControl) {
        if let Err(err) = self.save_edit_form(draw) {
            warn!(%err, "failed to save feature properties");
            return;
        }
        let show_toolbar = draw.get_mode().supports_editing();
        if let Some(form) = self.edit.as_mut() {
            form.stop_editing(show_toolbar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapdraw_core::draw::{ModeName, ModeOptions};
    use mapdraw_core::geometry::LngLat;
    use mapdraw_core::store::FeatureStore;

    fn trail() -> Feature {
        Feature::line_string(vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 0.0)])
    }

    fn editable() -> ControlOptions {
        ControlOptions::default()
            .with_edit_property("name", "Name")
            .with_edit_property("note", "Note")
    }

    fn attached(kind: ControlKind, options: &ControlOptions) -> InfoControl {
        let mut control = InfoControl::new(kind, options);
        control.attach();
        control
    }

    fn selection(store: &mut FeatureStore, ids: Vec<mapdraw_core::feature::FeatureId>) -> DrawEvent {
        store.select(ids);
        store.drain_events().remove(0)
    }

    #[test]
    fn test_supported_features() {
        let line = trail();
        let point = Feature::point(LngLat::new(1.0, 1.0));
        assert!(ControlKind::LineString.is_supported_features(std::slice::from_ref(&line)));
        assert!(!ControlKind::LineString.is_supported_features(&[line.clone(), line.clone()]));
        assert!(ControlKind::Point.is_supported_features(std::slice::from_ref(&point)));
        assert!(ControlKind::MultiLine.is_supported_features(&[line.clone(), line.clone()]));
        assert!(!ControlKind::MultiLine.is_supported_features(&[line, point]));
        assert!(!ControlKind::Point.is_supported_features(&[]));
    }

    #[test]
    fn test_title_with_length() {
        let mut store = FeatureStore::new();
        let id = store.add(trail().with_name("Trail")).unwrap();
        let mut control = attached(ControlKind::LineString, &ControlOptions::default());

        let event = selection(&mut store, vec![id]);
        control.on_event(&event, &store);
        assert!(control.panel().is_visible());
        assert_eq!(control.panel().text(), "Trail: 111.195 km");
    }

    #[test]
    fn test_title_fallbacks() {
        let mut store = FeatureStore::new();
        let line = store.add(trail().with_name("")).unwrap();
        let point = store.add(Feature::point(LngLat::new(3.0, 3.0))).unwrap();

        let line_control = InfoControl::line_string(&ControlOptions::default().with_units(DistanceUnits::None));
        let features = vec![store.get(&line).unwrap()];
        assert_eq!(line_control.features_title(&features, None, &store), "Line");

        let point_control = InfoControl::point(&ControlOptions::default().with_default_title("Waypoint"));
        let features = vec![store.get(&point).unwrap()];
        assert_eq!(point_control.features_title(&features, None, &store), "Waypoint");

        let multi = InfoControl::multi_line(&ControlOptions::default().with_units(DistanceUnits::Miles));
        let lines = vec![trail(), trail()];
        assert_eq!(multi.features_title(&lines, None, &store), "Multiple lines: 138.187 mi");
    }

    #[test]
    fn test_unsupported_selection_clears() {
        let mut store = FeatureStore::new();
        let a = store.add(trail()).unwrap();
        let b = store.add(trail()).unwrap();
        let mut control = attached(ControlKind::LineString, &ControlOptions::default());

        let event = selection(&mut store, vec![a.clone()]);
        control.on_event(&event, &store);
        assert!(control.panel().is_visible());

        let event = selection(&mut store, vec![a, b]);
        control.on_event(&event, &store);
        assert!(!control.panel().is_visible());
        assert_eq!(control.panel().text(), "");
    }

    #[test]
    fn test_detached_control_ignores_events() {
        let mut store = FeatureStore::new();
        let id = store.add(trail()).unwrap();
        let mut control = InfoControl::line_string(&ControlOptions::default());
        let event = selection(&mut store, vec![id]);
        control.on_event(&event, &store);
        assert!(!control.panel().is_visible());
    }

    #[test]
    fn test_line_progress_uses_transient_state() {
        let store = FeatureStore::new();
        let mut line_control = attached(ControlKind::LineString, &ControlOptions::default());
        let mut point_control = attached(ControlKind::Point, &ControlOptions::default());
        let event = DrawEvent::LineProgress {
            feature: trail(),
            state: FeatureState::named("Draft"),
        };

        line_control.on_event(&event, &store);
        point_control.on_event(&event, &store);
        assert_eq!(line_control.panel().text(), "Draft: 111.195 km");
        assert!(!point_control.panel().is_visible());
        assert!(!line_control.subscriptions().is_empty());
        assert!(!point_control.subscriptions().contains(&EventKind::LineProgress));
    }

    #[test]
    fn test_toolbar_only_when_editable() {
        assert!(InfoControl::line_string(&ControlOptions::default()).edit_form().is_none());

        let control = InfoControl::multi_line(&editable());
        let form = control.edit_form().unwrap();
        assert_eq!(form.toolbar(), &[ActionKind::JoinLines]);
    }

    #[test]
    fn test_toolbar_visibility_follows_mode() {
        let mut store = FeatureStore::new();
        let id = store.add(trail()).unwrap();
        let mut control = attached(ControlKind::LineString, &editable());

        let event = selection(&mut store, vec![id.clone()]);
        control.on_event(&event, &store);
        assert!(control.edit_form().unwrap().is_toolbar_visible());

        store.change_mode(ModeName::DrawLineString, ModeOptions::default());
        let event = DrawEvent::Create {
            features: vec![store.get(&id).unwrap()],
        };
        control.on_event(&event, &store);
        assert!(control.panel().is_visible());
        assert!(!control.edit_form().unwrap().is_toolbar_visible());
    }

    #[test]
    fn test_edit_form_prefill_and_save() {
        let mut store = FeatureStore::new();
        let id = store
            .add(trail().with_name("Old").with_property("note", "flat"))
            .unwrap();
        let mut control = attached(ControlKind::LineString, &editable());
        let event = selection(&mut store, vec![id.clone()]);
        control.on_event(&event, &store);

        control.on_input(ControlInput::Action(ActionKind::EditInfo), &mut store);
        let form = control.edit_form().unwrap();
        assert!(form.is_form_visible());
        assert!(!form.is_toolbar_visible());
        assert_eq!(form.value("name"), Some("Old"));
        assert_eq!(form.value("note"), Some("flat"));

        control.on_input(
            ControlInput::SetValue {
                name: "name".into(),
                value: "New".into(),
            },
            &mut store,
        );
        control.on_input(ControlInput::KeyUp(Key::Enter), &mut store);

        let saved = store.get(&id).unwrap();
        assert_eq!(saved.name(), Some("New"));
        assert_eq!(saved.property_text("note").as_deref(), Some("flat"));
        assert_eq!(control.panel().text(), "New: 111.195 km");
        let form = control.edit_form().unwrap();
        assert!(!form.is_form_visible());
        assert!(form.is_toolbar_visible());
        // 保存不经过事件
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_save_writes_every_selected_feature() {
        let mut store = FeatureStore::new();
        let a = store.add(trail()).unwrap();
        let b = store.add(trail()).unwrap();
        let mut control = attached(ControlKind::MultiLine, &editable());
        let event = selection(&mut store, vec![a.clone(), b.clone()]);
        control.on_event(&event, &store);

        control.show_edit_form(&store);
        assert_eq!(control.edit_form().unwrap().value("name"), Some(""));
        control.edit_form_mut().unwrap().set_value("note", "group");
        control.save_edit_form(&mut store).unwrap();

        for id in [a, b] {
            let feature = store.get(&id).unwrap();
            assert_eq!(feature.property_text("note").as_deref(), Some("group"));
            assert_eq!(feature.name(), Some(""));
        }
    }

    #[test]
    fn test_escape_closes_without_saving() {
        let mut store = FeatureStore::new();
        let id = store.add(trail().with_name("Keep")).unwrap();
        let mut control = attached(ControlKind::LineString, &editable());
        let event = selection(&mut store, vec![id.clone()]);
        control.on_event(&event, &store);

        control.on_input(ControlInput::Action(ActionKind::EditInfo), &mut store);
        control.edit_form_mut().unwrap().set_value("name", "Discard");
        control.on_input(ControlInput::KeyUp(Key::Escape), &mut store);

        assert_eq!(store.get(&id).unwrap().name(), Some("Keep"));
        assert!(!control.edit_form().unwrap().is_form_visible());
        assert!(control.edit_form().unwrap().is_toolbar_visible());
    }

    #[test]
    fn test_clear_then_set_is_idempotent() {
        let mut store = FeatureStore::new();
        let id = store.add(trail().with_name("Trail")).unwrap();
        let features = vec![store.get(&id).unwrap()];
        let mut control = attached(ControlKind::LineString, &editable());

        control.clear_features();
        control.set_features(&features, None, &store);
        let first = control.panel().clone();

        control.clear_features();
        control.set_features(&features, None, &store);
        assert_eq!(control.panel(), &first);
        assert!(control.panel().is_visible());
        assert_eq!(control.panel().text(), "Trail: 111.195 km");
    }

    #[test]
    fn test_escape_in_drawing_mode_keeps_toolbar_hidden() {
        let mut store = FeatureStore::new();
        let id = store.add(trail().with_name("Keep")).unwrap();
        let mut control = attached(ControlKind::LineString, &editable());
        let event = selection(&mut store, vec![id]);
        control.on_event(&event, &store);
        control.on_input(ControlInput::Action(ActionKind::EditInfo), &mut store);

        store.change_mode(ModeName::DrawLineString, ModeOptions::default());
        control.on_input(ControlInput::Cancel, &mut store);
        let form = control.edit_form().unwrap();
        assert!(!form.is_form_visible());
        assert!(!form.is_toolbar_visible());
    }

    #[test]
    fn test_cleared_panel_drops_open_form() {
        let mut store = FeatureStore::new();
        let line = store.add(trail().with_name("Line")).unwrap();
        let point = store.add(Feature::point(LngLat::new(5.0, 5.0)).with_name("Spring")).unwrap();
        let mut control = attached(ControlKind::LineString, &editable());
        let event = selection(&mut store, vec![line.clone()]);
        control.on_event(&event, &store);
        control.on_input(ControlInput::Action(ActionKind::EditInfo), &mut store);
        assert!(control.edit_form().unwrap().is_form_visible());

        // 选择换成点后，线控件的表单不能再写入
        let event = selection(&mut store, vec![point.clone()]);
        control.on_event(&event, &store);
        assert!(!control.edit_form().unwrap().is_form_visible());

        control.on_input(
            ControlInput::SetValue {
                name: "name".into(),
                value: "Overwritten".into(),
            },
            &mut store,
        );
        control.on_input(ControlInput::Confirm, &mut store);
        assert_eq!(store.get(&point).unwrap().name(), Some("Spring"));
        assert_eq!(store.get(&line).unwrap().name(), Some("Line"));
    }

    #[test]
    fn test_duplicate_action_rerenders() {
        let mut store = FeatureStore::new();
        let id = store.add(trail().with_name("Trail")).unwrap();
        let mut control = attached(ControlKind::LineString, &editable());
        let event = selection(&mut store, vec![id.clone()]);
        control.on_event(&event, &store);

        control.on_input(ControlInput::Action(ActionKind::Duplicate), &mut store);
        assert_eq!(store.len(), 2);
        let selected = store.get_selected();
        assert_ne!(selected[0].id, id);
        assert_eq!(control.panel().text(), "Line: 111.195 km");
    }

    #[test]
    fn test_unavailable_action_ignored() {
        let mut store = FeatureStore::new();
        let a = store.add(trail()).unwrap();
        let mut control = attached(ControlKind::Point, &editable());
        store.select(vec![a]);
        control.on_input(ControlInput::Action(ActionKind::Duplicate), &mut store);
        assert_eq!(store.len(), 1);
    }
}
