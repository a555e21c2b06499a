//! 绘图事件
//!
//! 宿主绘图工具按顺序发出离散事件，控件逐个消费。

use crate::draw::ModeName;
use crate::feature::{Feature, FeatureState};
use crate::geometry::LngLat;

/// 更新事件的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// 整体移动
    Move,
    /// 顶点坐标变化
    ChangeCoordinates,
    /// 属性变化
    ChangeProperties,
}

/// 事件类型（用于订阅）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Create,
    Update,
    SelectionChange,
    Delete,
    ModeChange,
    LineProgress,
}

/// 绘图事件
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    Create {
        features: Vec<Feature>,
    },
    Update {
        features: Vec<Feature>,
        action: UpdateAction,
    },
    SelectionChange {
        features: Vec<Feature>,
        /// 直接选择模式下被选中的顶点
        points: Vec<LngLat>,
    },
    Delete {
        features: Vec<Feature>,
    },
    ModeChange {
        mode: ModeName,
    },
    /// 正在绘制的线（尚未提交到存储）
    LineProgress {
        feature: Feature,
        state: FeatureState,
    },
}

impl DrawEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DrawEvent::Create { .. } => EventKind::Create,
            DrawEvent::Update { .. } => EventKind::Update,
            DrawEvent::SelectionChange { .. } => EventKind::SelectionChange,
            DrawEvent::Delete { .. } => EventKind::Delete,
            DrawEvent::ModeChange { .. } => EventKind::ModeChange,
            DrawEvent::LineProgress { .. } => EventKind::LineProgress,
        }
    }
}
