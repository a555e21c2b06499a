//! 几何图元与几何工具
//!
//! 支持的图元：
//! - 点 (Point)
//! - 折线 (LineString)
//!
//! 坐标为经纬度（度）。长度与中点在球面上计算，与宿主地理库一致；
//! 连接线段排序使用坐标空间内的平面距离。

use crate::units::DistanceUnits;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// 地球平均半径（米）
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// 经纬度坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// 转换为平面点（x = 经度, y = 纬度）
    pub fn to_point2(self) -> Point2<f64> {
        Point2::new(self.lng, self.lat)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self::new(lng, lat)
    }
}

/// 几何类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
}

impl GeometryType {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
        }
    }
}

/// 几何数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(LngLat),
    LineString(Vec<LngLat>),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        self.geometry_type().name()
    }

    /// 折线坐标；点返回 None
    pub fn line_coordinates(&self) -> Option<&[LngLat]> {
        match self {
            Geometry::LineString(coords) => Some(coords),
            Geometry::Point(_) => None,
        }
    }

    pub fn line_coordinates_mut(&mut self) -> Option<&mut Vec<LngLat>> {
        match self {
            Geometry::LineString(coords) => Some(coords),
            Geometry::Point(_) => None,
        }
    }
}

/// 在折线中查找与 `point` 完全相同的顶点
///
/// 每个坐标轴都做精确比较，不带容差：调用方传入的点必须取自同一条折线的顶点集合。
pub fn find_point_in_line(line: &[LngLat], point: LngLat) -> Option<usize> {
    line.iter().position(|&coord| coord == point)
}

/// 两点之间的大圆中心角（弧度）
fn central_angle(a: LngLat, b: LngLat) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// 球面距离
pub fn distance(a: LngLat, b: LngLat, units: DistanceUnits) -> f64 {
    central_angle(a, b) * units.earth_radius()
}

/// 两点之间的测地线中点
///
/// 从 `a` 沿初始方位角前进一半的大圆距离。
pub fn midpoint(a: LngLat, b: LngLat) -> LngLat {
    let lat1 = a.lat.to_radians();
    let lng1 = a.lng.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let bearing = (d_lng.sin() * lat2.cos())
        .atan2(lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos());
    let delta = central_angle(a, b) / 2.0;

    let lat = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let lng = lng1
        + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat.sin());

    LngLat::new(lng.to_degrees(), lat.to_degrees())
}

/// 折线长度
///
/// `DistanceUnits::None` 按约定不应被调用，若调用则返回 0。
pub fn length(coords: &[LngLat], units: DistanceUnits) -> f64 {
    coords
        .windows(2)
        .map(|pair| distance(pair[0], pair[1], units))
        .sum()
}

/// 多条折线的总长度
pub fn lines_length<'a, I>(lines: I, units: DistanceUnits) -> f64
where
    I: IntoIterator<Item = &'a [LngLat]>,
{
    lines.into_iter().map(|line| length(line, units)).sum()
}

/// 坐标空间内的平面距离
pub fn planar_distance(a: LngLat, b: LngLat) -> f64 {
    nalgebra::distance(&a.to_point2(), &b.to_point2())
}
