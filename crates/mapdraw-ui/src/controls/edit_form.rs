//! 编辑表单与工具栏
//!
//! 表单状态每次选择变化时从要素重新推导，不单独保存。

use crate::config::EditProperty;

/// 工具栏动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// 打开属性编辑表单
    EditInfo,
    /// 复制线
    Duplicate,
    /// 向线中添加点
    AddPoint,
    /// 拆分线
    SplitLine,
    /// 合并两条线
    JoinLines,
}

impl ActionKind {
    /// 样式类名
    pub fn class_name(&self) -> &'static str {
        match self {
            ActionKind::EditInfo => "edit-info",
            ActionKind::Duplicate => "duplicate-feature",
            ActionKind::AddPoint => "add-feature-point",
            ActionKind::SplitLine => "split-line",
            ActionKind::JoinLines => "join-lines",
        }
    }

    /// 提示文本
    pub fn title(&self) -> &'static str {
        match self {
            ActionKind::EditInfo => "Edit feature information",
            ActionKind::Duplicate => "Duplicate line",
            ActionKind::AddPoint => "Add point to line",
            ActionKind::SplitLine => "Split line",
            ActionKind::JoinLines => "Join lines",
        }
    }

    /// 按钮图标
    pub fn icon(&self) -> &'static str {
        match self {
            ActionKind::EditInfo => "✏",
            ActionKind::Duplicate => "⎘",
            ActionKind::AddPoint => "＋",
            ActionKind::SplitLine => "✂",
            ActionKind::JoinLines => "⛓",
        }
    }
}

/// 表单输入框
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub property: EditProperty,
    pub value: String,
}

/// 编辑表单
#[derive(Debug, Clone)]
pub struct EditForm {
    toolbar: Vec<ActionKind>,
    inputs: Vec<FormInput>,
    toolbar_visible: bool,
    form_visible: bool,
    /// 获得焦点的输入框
    focused: Option<usize>,
}

impl EditForm {
    pub fn new(properties: &[EditProperty], toolbar: Vec<ActionKind>) -> Self {
        Self {
            toolbar,
            inputs: properties
                .iter()
                .map(|property| FormInput {
                    property: property.clone(),
                    value: String::new(),
                })
                .collect(),
            toolbar_visible: false,
            form_visible: false,
            focused: None,
        }
    }

    pub fn toolbar(&self) -> &[ActionKind] {
        &self.toolbar
    }

    pub fn has_action(&self, action: ActionKind) -> bool {
        self.toolbar.contains(&action)
    }

    pub fn inputs(&self) -> &[FormInput] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut [FormInput] {
        &mut self.inputs
    }

    pub fn is_toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn focused_input(&self) -> Option<&FormInput> {
        self.focused.and_then(|i| self.inputs.get(i))
    }

    /// 渲染层取走焦点请求
    pub fn take_focus_request(&mut self) -> Option<usize> {
        self.focused.take()
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.inputs
            .iter()
            .find(|input| input.property.name == name)
            .map(|input| input.value.as_str())
    }

    /// 修改输入框的值；没有该输入框时返回 false
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.inputs.iter_mut().find(|input| input.property.name == name) {
            Some(input) => {
                input.value = value.into();
                true
            }
            None => false,
        }
    }

    /// 按属性键填充全部输入框
    pub fn fill(&mut self, mut value_for: impl FnMut(&str) -> String) {
        for input in &mut self.inputs {
            input.value = value_for(&input.property.name);
        }
    }

    /// 打开表单并聚焦第一个输入框
    pub fn show_edit_form(&mut self) {
        self.form_visible = true;
        self.focused = if self.inputs.is_empty() { None } else { Some(0) };
    }

    pub fn hide_edit_form(&mut self) {
        self.form_visible = false;
        self.focused = None;
    }

    pub fn show_toolbar(&mut self) {
        self.toolbar_visible = true;
    }

    pub fn hide_toolbar(&mut self) {
        self.toolbar_visible = false;
    }

    /// 关闭表单；当前模式允许编辑时恢复工具栏
    pub fn stop_editing(&mut self, show_toolbar: bool) {
        self.hide_edit_form();
        self.toolbar_visible = show_toolbar;
    }

    /// 当前表单中的 (属性键, 值)
    pub fn values(&self) -> Vec<(String, String)> {
        self.inputs
            .iter()
            .map(|input| (input.property.name.clone(), input.value.clone()))
            .collect()
    }
}
