//! 折线绘制模式
//!
//! 草稿线的末尾（或开头）始终有一个跟随鼠标的预览顶点，
//! 位置由 `current_vertex_position` 指示；停止时先移除预览顶点再提交。

use super::{Cursor, DrawMode, ModeResult};
use egui::Key;
use mapdraw_core::draw::{DrawControl, ModeName, ModeOptions};
use mapdraw_core::error::DrawError;
use mapdraw_core::event::{DrawEvent, UpdateAction};
use mapdraw_core::feature::{Feature, FeatureId};
use mapdraw_core::geometry::LngLat;
use tracing::{debug, info, warn};

/// 新顶点的添加方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 追加到末尾
    Forward,
    /// 插入到开头
    Backwards,
}

/// 折线绘制状态
#[derive(Debug, Clone)]
pub struct DrawLineString {
    /// 草稿线，提交前不在存储中修改
    line: Feature,
    /// 是否在延长存储中已有的线
    extending: bool,
    direction: Direction,
    /// 预览顶点的位置
    current_vertex_position: usize,
    cancelled: bool,
}

impl DrawLineString {
    /// 进入模式
    ///
    /// 给定 `feature_id` 时从 `from` 所在的端点继续绘制该线；
    /// `from` 与两端都不重合时改为绘制新线。
    pub fn setup(options: &ModeOptions, draw: &dyn DrawControl) -> Result<Self, DrawError> {
        let Some(id) = options.feature_id.as_ref() else {
            return Ok(Self::new_line());
        };

        let line = draw.get(id).ok_or_else(|| DrawError::FeatureNotFound(id.clone()))?;
        let Some(coords) = line.line_coordinates() else {
            return Err(DrawError::InvalidGeometry {
                id: id.clone(),
                reason: format!("cannot continue drawing a {}", line.geometry.type_name()),
            });
        };
        let (Some(&first), Some(&last)) = (coords.first(), coords.last()) else {
            return Err(DrawError::InvalidGeometry {
                id: id.clone(),
                reason: "line has no coordinates".to_string(),
            });
        };

        let from = options.from.unwrap_or(last);
        let mut state = Self {
            line,
            extending: true,
            direction: Direction::Forward,
            current_vertex_position: 0,
            cancelled: false,
        };
        if from == last {
            state.current_vertex_position = state.coordinates().len();
            state.add_coordinate(state.current_vertex_position, last);
        } else if from == first {
            state.direction = Direction::Backwards;
            state.add_coordinate(0, first);
        } else {
            warn!(%id, ?from, "start point is not an endpoint of the line, drawing a new line");
            return Ok(Self::new_line());
        }
        debug!(%id, direction = ?state.direction, "continuing line");
        Ok(state)
    }

    fn new_line() -> Self {
        Self {
            line: Feature::line_string(Vec::new()),
            extending: false,
            direction: Direction::Forward,
            current_vertex_position: 0,
            cancelled: false,
        }
    }

    /// 草稿线（包含预览顶点）
    pub fn line(&self) -> &Feature {
        &self.line
    }

    pub fn id(&self) -> &FeatureId {
        &self.line.id
    }

    pub fn coordinates(&self) -> &[LngLat] {
        self.line.line_coordinates().unwrap_or_default()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_vertex_position(&self) -> usize {
        self.current_vertex_position
    }

    pub fn is_extending(&self) -> bool {
        self.extending
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn coordinates_mut(&mut self) -> Option<&mut Vec<LngLat>> {
        self.line.geometry.line_coordinates_mut()
    }

    /// 修改顶点；位置等于长度时追加
    fn update_coordinate(&mut self, index: usize, position: LngLat) {
        if let Some(coords) = self.coordinates_mut() {
            if index < coords.len() {
                coords[index] = position;
            } else if index == coords.len() {
                coords.push(position);
            }
        }
    }

    fn add_coordinate(&mut self, index: usize, position: LngLat) {
        if let Some(coords) = self.coordinates_mut() {
            coords.insert(index.min(coords.len()), position);
        }
    }

    /// 点击的是否是上一个已确定的顶点
    fn is_previous_vertex(&self, position: LngLat) -> bool {
        let coords = self.coordinates();
        let previous = match self.direction {
            Direction::Forward if self.current_vertex_position > 0 => coords.get(self.current_vertex_position - 1),
            Direction::Forward => None,
            Direction::Backwards => coords.get(self.current_vertex_position + 1),
        };
        previous == Some(&position)
    }

    fn finish(&self) -> ModeResult {
        ModeResult::select(vec![self.line.id.clone()])
    }
}

impl DrawMode for DrawLineString {
    fn name(&self) -> ModeName {
        ModeName::DrawLineString
    }

    fn on_mouse_move(&mut self, position: LngLat, _draw: &mut dyn DrawControl) -> ModeResult {
        self.update_coordinate(self.current_vertex_position, position);
        ModeResult::Continue
    }

    fn click_anywhere(&mut self, position: LngLat, _draw: &mut dyn DrawControl) -> ModeResult {
        if self.is_previous_vertex(position) {
            return self.finish();
        }

        self.update_coordinate(self.current_vertex_position, position);
        match self.direction {
            Direction::Forward => {
                self.current_vertex_position += 1;
                self.update_coordinate(self.current_vertex_position, position);
            }
            Direction::Backwards => self.add_coordinate(0, position),
        }
        ModeResult::Continue
    }

    fn on_key_up(&mut self, key: Key, _draw: &mut dyn DrawControl) -> ModeResult {
        match key {
            Key::Enter => self.finish(),
            Key::Escape => {
                self.cancelled = true;
                debug!(id = %self.line.id, "line drawing cancelled");
                ModeResult::ChangeMode(ModeName::SimpleSelect, ModeOptions::default())
            }
            _ => ModeResult::Continue,
        }
    }

    fn on_stop(&mut self, draw: &mut dyn DrawControl) -> Result<Option<FeatureId>, DrawError> {
        if self.cancelled {
            return Ok(None);
        }

        let position = self.current_vertex_position;
        if let Some(coords) = self.coordinates_mut() {
            if position < coords.len() {
                coords.remove(position);
            }
        }
        if self.line.validate().is_err() {
            debug!(id = %self.line.id, "discarding incomplete line");
            return Ok(None);
        }

        let id = draw.add(self.line.clone())?;
        let feature = draw.get(&id).unwrap_or_else(|| self.line.clone());
        if self.extending {
            draw.fire(DrawEvent::Update {
                features: vec![feature],
                action: UpdateAction::ChangeCoordinates,
            });
        } else {
            draw.fire(DrawEvent::Create { features: vec![feature] });
        }
        info!(%id, extended = self.extending, vertices = self.coordinates().len(), "line committed");
        Ok(Some(id))
    }

    fn cursor(&self) -> Cursor {
        Cursor::Add
    }
}
