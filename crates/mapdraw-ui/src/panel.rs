//! egui 渲染
//!
//! 渲染函数只读写控件自身的显示状态，用户操作以返回值交给宿主处理。

use crate::controls::{ControlInput, InfoControl};
use crate::host::{ControlHandle, MapHost};
use crate::modes::NamePrompt;
use egui::Key;

/// 名称输入框上的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    /// Create 按钮
    Create,
    KeyUp(Key),
}

/// 输入框失去焦点时按下的 Enter/Escape
fn submitted_key(ui: &egui::Ui, response: &egui::Response) -> Option<Key> {
    if !response.lost_focus() {
        return None;
    }
    ui.input(|input| {
        if input.key_pressed(Key::Enter) {
            Some(Key::Enter)
        } else if input.key_pressed(Key::Escape) {
            Some(Key::Escape)
        } else {
            None
        }
    })
}

/// 渲染信息控件：标题、工具栏和编辑表单
pub fn show_info_control(ui: &mut egui::Ui, control: &mut InfoControl) -> Option<ControlInput> {
    if !control.panel().is_visible() {
        return None;
    }

    let mut input = None;
    ui.strong(control.panel().text());

    let Some(form) = control.edit_form_mut() else {
        return None;
    };

    if form.is_toolbar_visible() {
        ui.horizontal(|ui| {
            for &action in form.toolbar() {
                if ui.button(action.icon()).on_hover_text(action.title()).clicked() {
                    input = Some(ControlInput::Action(action));
                }
            }
        });
    }

    if form.is_form_visible() {
        let focus = form.take_focus_request();
        egui::Grid::new(ui.id().with("edit_form")).num_columns(2).show(ui, |ui| {
            for (index, field) in form.inputs_mut().iter_mut().enumerate() {
                ui.label(field.property.label.as_str());
                let response = ui.text_edit_singleline(&mut field.value);
                if focus == Some(index) {
                    response.request_focus();
                }
                if let Some(key) = submitted_key(ui, &response) {
                    input = Some(ControlInput::KeyUp(key));
                }
                ui.end_row();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("OK").clicked() {
                input = Some(ControlInput::Confirm);
            }
            if ui.button("Cancel").clicked() {
                input = Some(ControlInput::Cancel);
            }
        });
    }

    input
}

/// 渲染名称输入框
pub fn show_name_prompt(ui: &mut egui::Ui, prompt: &mut NamePrompt) -> Option<PromptInput> {
    let mut input = None;
    ui.horizontal(|ui| {
        ui.label("Name:");
        let focus = prompt.take_focus_request();
        let response = ui.text_edit_singleline(prompt.value_mut());
        if focus {
            response.request_focus();
        }
        if let Some(key) = submitted_key(ui, &response) {
            input = Some(PromptInput::KeyUp(key));
        }
        if ui.button("Create").clicked() {
            input = Some(PromptInput::Create);
        }
    });
    input
}

/// 渲染宿主上的全部浮层，并把用户操作交给宿主
pub fn show_overlays(ctx: &egui::Context, host: &mut MapHost) {
    let mut control_inputs: Vec<(ControlHandle, ControlInput)> = Vec::new();

    let handles: Vec<ControlHandle> = host.controls().map(|(handle, _)| handle).collect();
    for (slot, handle) in handles.into_iter().enumerate() {
        let Some(control) = host.control_mut(handle) else {
            continue;
        };
        if !control.panel().is_visible() {
            continue;
        }
        egui::Area::new(egui::Id::new(("info_control", slot)))
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0 + 96.0 * slot as f32])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    if let Some(input) = show_info_control(ui, control) {
                        control_inputs.push((handle, input));
                    }
                });
            });
    }

    let mut prompt_input = None;
    if let Some(prompt) = host.drawing_mode_mut().and_then(|mode| mode.prompt_mut()) {
        egui::Area::new(egui::Id::new("name_prompt"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 16.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    prompt_input = show_name_prompt(ui, prompt);
                });
            });
    }

    if host.drawing_mode().is_some() {
        ctx.set_cursor_icon(host.cursor().to_egui());
    }

    for (handle, input) in control_inputs {
        host.control_input(handle, input);
    }
    match prompt_input {
        Some(PromptInput::Create) => host.submit_name(),
        Some(PromptInput::KeyUp(key)) => host.key_up(key),
        None => {}
    }
}
