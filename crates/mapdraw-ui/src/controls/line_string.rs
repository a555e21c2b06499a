//! 单条线的编辑动作：复制、加点、拆分

use mapdraw_core::draw::{DrawControl, ModeName, ModeOptions};
use mapdraw_core::error::DrawError;
use mapdraw_core::feature::{Feature, FeatureId};
use mapdraw_core::geometry::{find_point_in_line, midpoint, Geometry, LngLat};
use tracing::{debug, info};

/// 唯一选中的线
fn single_selected_line(draw: &dyn DrawControl) -> Option<Feature> {
    let mut selected = draw.get_selected();
    if selected.len() == 1 && selected[0].is_line_string() {
        selected.pop()
    } else {
        None
    }
}

/// 复制唯一选中的要素
///
/// 副本使用新ID和空属性，并成为新的选择。
pub fn duplicate_line(draw: &mut dyn DrawControl) -> Result<Option<FeatureId>, DrawError> {
    let selected = draw.get_selected();
    let [original] = selected.as_slice() else {
        return Ok(None);
    };

    let copy = Feature::new(original.geometry.clone());
    let id = draw.add(copy)?;
    draw.change_mode(ModeName::SimpleSelect, ModeOptions::select(vec![id.clone()]));
    info!(%id, source = %original.id, "feature duplicated");
    Ok(Some(id))
}

/// 从线的最后一个顶点继续绘制
pub fn extend_line_string(line: &Feature, draw: &mut dyn DrawControl) {
    let Some(&last) = line.line_coordinates().and_then(<[LngLat]>::last) else {
        return;
    };
    debug!(id = %line.id, "extending line");
    draw.change_mode(
        ModeName::DrawLineString,
        ModeOptions {
            feature_id: Some(line.id.clone()),
            from: Some(last),
            feature_name: line.name().map(str::to_string),
            show_name_prompt: Some(false),
            ..Default::default()
        },
    );
}

/// 在 `point` 之后插入与下一个顶点的中点
///
/// `point` 是最后一个顶点时改为继续绘制。返回是否插入了顶点。
pub fn insert_point_into_line(
    mut line: Feature,
    point: LngLat,
    draw: &mut dyn DrawControl,
) -> Result<bool, DrawError> {
    let Some(coords) = line.geometry.line_coordinates_mut() else {
        return Ok(false);
    };
    let Some(index) = find_point_in_line(coords, point) else {
        return Ok(false);
    };

    if index + 1 == coords.len() {
        extend_line_string(&line, draw);
        return Ok(false);
    }

    let mid = midpoint(coords[index], coords[index + 1]);
    coords.insert(index + 1, mid);
    let id = draw.add(line)?;
    info!(%id, after = index, "point inserted into line");
    Ok(true)
}

/// 按当前模式向唯一选中的线添加点
///
/// 整体选择时继续绘制；选中一个顶点时在其后插入中点。返回是否插入了顶点。
pub fn add_point_to_line(draw: &mut dyn DrawControl) -> Result<bool, DrawError> {
    let Some(line) = single_selected_line(&*draw) else {
        return Ok(false);
    };

    match draw.get_mode() {
        ModeName::SimpleSelect => {
            extend_line_string(&line, draw);
            Ok(false)
        }
        ModeName::DirectSelect => match draw.get_selected_points().as_slice() {
            [point] => insert_point_into_line(line, *point, draw),
            _ => Ok(false),
        },
        ModeName::DrawLineString => Ok(false),
    }
}

/// 在顶点 `point` 处把线拆成两条
///
/// 只拆分内部顶点 `i`（`0 < i < len - 2`），在其后一个位置切开：原线保留 `[..=i]`，
/// 新线（新ID、空属性）得到 `[i + 1..]`。
pub fn split_line(mut line: Feature, point: LngLat, draw: &mut dyn DrawControl) -> Result<Option<FeatureId>, DrawError> {
    let Some(coords) = line.geometry.line_coordinates_mut() else {
        return Ok(None);
    };
    let Some(index) = find_point_in_line(coords, point) else {
        return Ok(None);
    };
    if index == 0 || index + 2 >= coords.len() {
        debug!(index, len = coords.len(), "split point is not an interior vertex");
        return Ok(None);
    }

    let tail = coords.split_off(index + 1);
    let new_line = Feature::new(Geometry::LineString(tail));
    new_line.validate()?;
    line.validate()?;

    let original = draw.add(line)?;
    let created = draw.add(new_line)?;
    info!(%original, %created, at = index, "line split");
    Ok(Some(created))
}

/// 在选中的顶点处拆分唯一选中的线
pub fn split_selected_line(draw: &mut dyn DrawControl) -> Result<Option<FeatureId>, DrawError> {
    if draw.get_mode() != ModeName::DirectSelect {
        return Ok(None);
    }
    let Some(line) = single_selected_line(&*draw) else {
        return Ok(None);
    };
    match draw.get_selected_points().as_slice() {
        [point] => split_line(line, *point, draw),
        _ => Ok(None),
    }
}
