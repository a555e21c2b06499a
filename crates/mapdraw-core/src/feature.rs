//! 要素定义
//!
//! 要素由宿主的要素存储持有，控件只读取快照并通过命令修改。

use crate::error::DrawError;
use crate::geometry::{Geometry, GeometryType, LngLat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 显示名称所在的属性键
pub const NAME_PROPERTY: &str = "name";

/// 要素属性
pub type Properties = serde_json::Map<String, Value>;

/// 要素唯一标识符
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(String);

impl FeatureId {
    /// 生成新的唯一ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FeatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// 要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    /// 创建带新ID、空属性的要素
    pub fn new(geometry: Geometry) -> Self {
        Self::with_id(FeatureId::new(), geometry)
    }

    pub fn with_id(id: FeatureId, geometry: Geometry) -> Self {
        Self {
            id,
            geometry,
            properties: Properties::new(),
        }
    }

    pub fn point(position: LngLat) -> Self {
        Self::new(Geometry::Point(position))
    }

    pub fn line_string(coords: Vec<LngLat>) -> Self {
        Self::new(Geometry::LineString(coords))
    }

    /// 设置属性（构建器风格）
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_property(NAME_PROPERTY, name.into())
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry.geometry_type()
    }

    pub fn is_line_string(&self) -> bool {
        self.geometry_type() == GeometryType::LineString
    }

    pub fn is_point(&self) -> bool {
        self.geometry_type() == GeometryType::Point
    }

    pub fn line_coordinates(&self) -> Option<&[LngLat]> {
        self.geometry.line_coordinates()
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// 属性的文本形式（用于编辑表单）
    pub fn property_text(&self, key: &str) -> Option<String> {
        property_text(&self.properties, key)
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.get(NAME_PROPERTY).and_then(Value::as_str)
    }

    /// 检查几何是否满足存储要求
    pub fn validate(&self) -> Result<(), DrawError> {
        match &self.geometry {
            Geometry::LineString(coords) if coords.len() < 2 => Err(DrawError::InvalidGeometry {
                id: self.id.clone(),
                reason: format!("line string needs at least 2 coordinates, got {}", coords.len()),
            }),
            _ => Ok(()),
        }
    }
}

/// 读取属性的文本形式：字符串原样返回，其他非空值使用 JSON 表示
pub fn property_text(properties: &Properties, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 进行中要素的临时状态
///
/// 尚未写入存储的要素（例如正在绘制的线）通过它携带名称。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureState {
    pub name: Option<String>,
}

impl FeatureState {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

// ========== GeoJSON 交换 ==========

fn position_from_geojson(position: &[f64]) -> Result<LngLat, DrawError> {
    match position {
        [lng, lat, ..] => Ok(LngLat::new(*lng, *lat)),
        _ => Err(DrawError::InvalidPosition(position.len())),
    }
}

fn position_to_geojson(position: LngLat) -> Vec<f64> {
    vec![position.lng, position.lat]
}

fn geojson_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

impl From<&Geometry> for geojson::Geometry {
    fn from(geometry: &Geometry) -> Self {
        let value = match geometry {
            Geometry::Point(p) => geojson::Value::Point(position_to_geojson(*p)),
            Geometry::LineString(coords) => {
                geojson::Value::LineString(coords.iter().copied().map(position_to_geojson).collect())
            }
        };
        geojson::Geometry::new(value)
    }
}

impl TryFrom<&geojson::Geometry> for Geometry {
    type Error = DrawError;

    fn try_from(geometry: &geojson::Geometry) -> Result<Self, Self::Error> {
        match &geometry.value {
            geojson::Value::Point(p) => Ok(Geometry::Point(position_from_geojson(p)?)),
            geojson::Value::LineString(coords) => Ok(Geometry::LineString(
                coords
                    .iter()
                    .map(|p| position_from_geojson(p))
                    .collect::<Result<_, _>>()?,
            )),
            other => Err(DrawError::UnsupportedGeometry(geojson_type_name(other).to_string())),
        }
    }
}

impl From<&Feature> for geojson::Feature {
    fn from(feature: &Feature) -> Self {
        geojson::Feature {
            bbox: None,
            geometry: Some((&feature.geometry).into()),
            id: Some(geojson::feature::Id::String(feature.id.to_string())),
            properties: Some(feature.properties.clone()),
            foreign_members: None,
        }
    }
}

impl TryFrom<&geojson::Feature> for Feature {
    type Error = DrawError;

    /// 没有ID的要素会分配新ID
    fn try_from(feature: &geojson::Feature) -> Result<Self, Self::Error> {
        let geometry = feature.geometry.as_ref().ok_or(DrawError::MissingGeometry)?;
        let id = match &feature.id {
            Some(geojson::feature::Id::String(s)) => FeatureId::from(s.as_str()),
            Some(geojson::feature::Id::Number(n)) => FeatureId::from(n.to_string()),
            None => FeatureId::new(),
        };
        Ok(Feature {
            id,
            geometry: Geometry::try_from(geometry)?,
            properties: feature.properties.clone().unwrap_or_default(),
        })
    }
}
