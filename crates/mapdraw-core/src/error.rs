//! 要素存储与交换错误定义

use crate::feature::FeatureId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error("Feature not found: {0}")]
    FeatureNotFound(FeatureId),

    #[error("Invalid geometry for feature {id}: {reason}")]
    InvalidGeometry { id: FeatureId, reason: String },

    #[error("Unsupported GeoJSON geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Feature has no geometry")]
    MissingGeometry,

    #[error("Invalid position: expected at least 2 values, got {0}")]
    InvalidPosition(usize),
}
