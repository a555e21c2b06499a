//! 名称输入框
//!
//! 由命名线模式持有；模式丢弃它即关闭输入框，离开模式时不会遗留。

use tracing::debug;

#[derive(Debug)]
pub struct NamePrompt {
    value: String,
    focus_requested: bool,
}

impl NamePrompt {
    /// 打开输入框并请求焦点
    pub fn open(initial: Option<&str>) -> Self {
        debug!(prefilled = initial.is_some(), "name prompt opened");
        Self {
            value: initial.unwrap_or_default().to_string(),
            focus_requested: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut String {
        &mut self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    pub fn is_focus_requested(&self) -> bool {
        self.focus_requested
    }

    /// 渲染层取走焦点请求
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

impl Drop for NamePrompt {
    fn drop(&mut self) {
        debug!("name prompt closed");
    }
}
