//! 两条线的合并

use mapdraw_core::draw::DrawControl;
use mapdraw_core::error::DrawError;
use mapdraw_core::feature::{Feature, FeatureId};
use mapdraw_core::geometry::{planar_distance, LngLat};
use tracing::debug;

fn endpoints(line: &Feature) -> Option<(LngLat, LngLat)> {
    let coords = line.line_coordinates()?;
    Some((*coords.first()?, *coords.last()?))
}

/// 决定合并顺序
///
/// 比较 A 终点到 B 起点与 B 终点到 A 起点的平面距离，取较近的一种；
/// 相等时保持 (A, B)。
pub fn order_for_join<'a>(a: &'a Feature, b: &'a Feature) -> (&'a Feature, &'a Feature) {
    let (Some((a_start, a_end)), Some((b_start, b_end))) = (endpoints(a), endpoints(b)) else {
        return (a, b);
    };
    if planar_distance(a_end, b_start) <= planar_distance(b_end, a_start) {
        (a, b)
    } else {
        (b, a)
    }
}

/// 合并选中的两条线
///
/// 第二条线的全部坐标接到第一条之后，第一条保留其ID和属性。
pub fn join_lines(draw: &mut dyn DrawControl) -> Result<Option<FeatureId>, DrawError> {
    let selected = draw.get_selected();
    let [a, b] = selected.as_slice() else {
        return Ok(None);
    };
    if !a.is_line_string() || !b.is_line_string() {
        return Ok(None);
    }

    let (first, second) = order_for_join(a, b);
    let mut merged = first.clone();
    if let (Some(coords), Some(tail)) = (merged.geometry.line_coordinates_mut(), second.line_coordinates()) {
        coords.extend_from_slice(tail);
    }
    debug!(first = %first.id, second = %second.id, "joining lines");
    draw.join(merged, &second.id).map(Some)
}
