//! 端到端场景：绘制命名线、拆分、合并、重命名

use egui::Key;
use mapdraw_core::prelude::*;
use mapdraw_ui::{ActionKind, ControlHandle, ControlInput, ControlKind, DrawConfig, MapHost, Phase};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const CONFIG: &str = r#"{
    "lineControl": { "editProperties": [{ "name": "name", "label": "Name" }] },
    "pointControl": {},
    "multiLineControl": { "editProperties": [{ "name": "name", "label": "Name" }] },
    "namedLine": { "isNameRequired": true }
}"#;

fn init_logging() -> tracing::subscriber::DefaultGuard {
    tracing::subscriber::set_default(
        FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish(),
    )
}

fn host() -> MapHost {
    let config = DrawConfig::from_json_str(CONFIG).unwrap();
    MapHost::from_config(FeatureStore::new(), &config)
}

fn handle(host: &MapHost, kind: ControlKind) -> ControlHandle {
    host.controls()
        .find(|(_, control)| control.kind() == kind)
        .map(|(handle, _)| handle)
        .unwrap()
}

fn text(host: &MapHost, handle: ControlHandle) -> Option<String> {
    let panel = host.control(handle).unwrap().panel();
    panel.is_visible().then(|| panel.text().to_string())
}

fn p(x: f64, y: f64) -> LngLat {
    LngLat::new(x, y)
}

fn draw_points(host: &mut MapHost, points: &[LngLat]) {
    for &point in points {
        host.mouse_move(point);
        host.click(point);
    }
}

#[test]
fn test_trail_lifecycle() {
    let _guard = init_logging();
    let mut host = host();
    let line = handle(&host, ControlKind::LineString);
    let multi = handle(&host, ControlKind::MultiLine);

    // 没有名称时点击地图直接退出绘制
    host.change_mode(ModeName::DrawLineString, ModeOptions::default());
    assert_eq!(host.drawing_mode().unwrap().phase(), Phase::AwaitingName);
    host.click(p(0.0, 0.0));
    assert!(host.drawing_mode().is_none());
    assert!(host.store().is_empty());

    // 输入名称后绘制
    host.change_mode(ModeName::DrawLineString, ModeOptions::default());
    host.name_prompt_input("Trail A");
    host.submit_name();
    assert_eq!(host.drawing_mode().unwrap().phase(), Phase::CollectingPoints);

    draw_points(&mut host, &[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)]);
    host.mouse_move(p(4.0, 0.0));
    assert_eq!(text(&host, line).as_deref(), Some("Trail A: 444.78 km"));

    host.key_up(Key::Enter);
    assert!(host.drawing_mode().is_none());
    let selected = host.store().get_selected();
    assert_eq!(selected.len(), 1);
    let trail = selected[0].id.clone();
    assert_eq!(selected[0].name(), Some("Trail A"));
    assert_eq!(text(&host, line).as_deref(), Some("Trail A: 333.585 km"));

    // 在第二个顶点处拆分
    host.select_vertex(&trail, 1).unwrap();
    host.control_input(line, ControlInput::Action(ActionKind::SplitLine));
    assert_eq!(host.store().len(), 2);
    assert_eq!(text(&host, line).as_deref(), Some("Trail A: 111.195 km"));
    let tail = host
        .store()
        .get_all()
        .into_iter()
        .find(|feature| feature.id != trail)
        .unwrap();
    assert_eq!(tail.line_coordinates().unwrap(), &[p(2.0, 0.0), p(3.0, 0.0)]);

    // 选中两条线后合并
    host.select(vec![trail.clone(), tail.id.clone()]);
    assert_eq!(text(&host, line), None);
    assert_eq!(text(&host, multi).as_deref(), Some("Multiple lines: 222.39 km"));

    host.control_input(multi, ControlInput::Action(ActionKind::JoinLines));
    assert_eq!(host.store().len(), 1);
    assert_eq!(text(&host, multi), None);
    assert_eq!(text(&host, line).as_deref(), Some("Trail A: 333.585 km"));
    let merged = host.store().get(&trail).unwrap();
    assert_eq!(
        merged.line_coordinates().unwrap(),
        &[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)]
    );

    // 重命名
    host.control_input(line, ControlInput::Action(ActionKind::EditInfo));
    assert_eq!(
        host.control(line).unwrap().edit_form().unwrap().value("name"),
        Some("Trail A")
    );
    host.control_input(
        line,
        ControlInput::SetValue {
            name: "name".into(),
            value: "Trail B".into(),
        },
    );
    host.control_input(line, ControlInput::Confirm);
    assert_eq!(host.store().get(&trail).unwrap().name(), Some("Trail B"));
    assert_eq!(text(&host, line).as_deref(), Some("Trail B: 333.585 km"));

    // 删除后面板隐藏
    host.trash();
    assert!(host.store().is_empty());
    assert_eq!(text(&host, line), None);
}

#[test]
fn test_extend_selected_line() {
    let _guard = init_logging();
    let mut host = host();
    let line = handle(&host, ControlKind::LineString);
    let id = host
        .store_mut()
        .add(Feature::line_string(vec![p(0.0, 0.0), p(1.0, 0.0)]).with_name("Trail A"))
        .unwrap();
    host.select(vec![id.clone()]);
    assert!(host.control(line).unwrap().edit_form().unwrap().is_toolbar_visible());

    host.control_input(line, ControlInput::Action(ActionKind::AddPoint));
    let mode = host.drawing_mode().unwrap();
    assert_eq!(mode.phase(), Phase::CollectingPoints);
    assert_eq!(mode.feature_name(), Some("Trail A"));

    draw_points(&mut host, &[p(2.0, 0.0)]);
    assert!(!host.control(line).unwrap().edit_form().unwrap().is_toolbar_visible());
    host.key_up(Key::Enter);

    let extended = host.store().get(&id).unwrap();
    assert_eq!(extended.line_coordinates().unwrap(), &[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
    assert_eq!(extended.name(), Some("Trail A"));
    assert_eq!(host.store().get_selected_points(), Vec::<LngLat>::new());
    assert_eq!(text(&host, line).as_deref(), Some("Trail A: 222.39 km"));
    assert!(host.control(line).unwrap().edit_form().unwrap().is_toolbar_visible());
}

#[test]
fn test_escape_cancels_without_touching_store() {
    let _guard = init_logging();
    let mut host = host();
    let id = host
        .store_mut()
        .add(Feature::line_string(vec![p(0.0, 0.0), p(1.0, 0.0)]).with_name("Trail A"))
        .unwrap();
    host.change_mode(
        ModeName::DrawLineString,
        ModeOptions {
            feature_id: Some(id.clone()),
            from: Some(p(1.0, 0.0)),
            feature_name: Some("Trail A".into()),
            ..Default::default()
        },
    );
    draw_points(&mut host, &[p(5.0, 5.0)]);
    host.key_up(Key::Escape);

    assert!(host.drawing_mode().is_none());
    assert_eq!(host.store().get(&id).unwrap().line_coordinates().unwrap().len(), 2);
    assert_eq!(host.store().get_mode(), ModeName::SimpleSelect);
}
