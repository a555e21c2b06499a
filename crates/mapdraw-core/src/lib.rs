//! MapDraw 核心
//!
//! 提供地图绘图要素模型、几何工具以及宿主绘图工具的命令接口。
//!
//! # 架构设计
//!
//! - `Feature`: 带唯一ID、几何与属性的要素，由要素存储持有
//! - `DrawControl`: 宿主绘图工具的命令接口（增删改、模式切换、选择查询）
//! - `FeatureStore`: 内存中的参考实现，负责事件队列与选择集
//!
//! # 示例
//!
//! ```rust
//! use mapdraw_core::prelude::*;
//!
//! let line = Feature::line_string(vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 0.0)]);
//! let km = length(line.line_coordinates().unwrap(), DistanceUnits::Kilometers);
//! println!("Length: {}", DistanceUnits::Kilometers.format_length(km));
//! ```

pub mod draw;
pub mod error;
pub mod event;
pub mod feature;
pub mod geometry;
pub mod store;
pub mod units;

pub use error::DrawError;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::draw::{DrawControl, ModeChange, ModeName, ModeOptions};
    pub use crate::error::DrawError;
    pub use crate::event::{DrawEvent, EventKind, UpdateAction};
    pub use crate::feature::{Feature, FeatureId, FeatureState, Properties, NAME_PROPERTY};
    pub use crate::geometry::{
        find_point_in_line, length, lines_length, midpoint, planar_distance, Geometry, GeometryType, LngLat,
    };
    pub use crate::store::FeatureStore;
    pub use crate::units::DistanceUnits;
}
