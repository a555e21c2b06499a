//! 内存要素存储
//!
//! 复现宿主绘图工具的要素存储：要素、选择集、交互模式和事件队列。
//! API 命令（add/delete/set_feature_property/change_mode）不发事件，
//! 用户交互（选择、拖动顶点、删除）和 `join` 会发出对应的事件。

use crate::draw::{DrawControl, ModeChange, ModeName, ModeOptions};
use crate::error::DrawError;
use crate::event::{DrawEvent, UpdateAction};
use crate::feature::{Feature, FeatureId};
use crate::geometry::LngLat;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::{debug, info};

/// 内存要素存储
#[derive(Debug, Default)]
pub struct FeatureStore {
    /// 按添加顺序保存的要素
    features: IndexMap<FeatureId, Feature>,
    /// 选中的要素
    selected: Vec<FeatureId>,
    /// 直接选择模式下选中的顶点索引
    selected_coords: Vec<usize>,
    /// 当前交互模式
    mode: ModeName,
    /// 待分发的事件
    events: VecDeque<DrawEvent>,
    /// 待处理的模式切换
    pending_mode: Option<ModeChange>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, id: &FeatureId) -> bool {
        self.features.contains_key(id)
    }

    pub fn selected_ids(&self) -> &[FeatureId] {
        &self.selected
    }

    /// 取出所有待分发的事件
    pub fn drain_events(&mut self) -> Vec<DrawEvent> {
        self.events.drain(..).collect()
    }

    /// 取出待处理的模式切换
    pub fn take_mode_change(&mut self) -> Option<ModeChange> {
        self.pending_mode.take()
    }

    fn features_for(&self, ids: &[FeatureId]) -> Vec<Feature> {
        ids.iter().filter_map(|id| self.features.get(id).cloned()).collect()
    }

    // ========== 用户交互 ==========

    /// 用户点选要素（进入 simple_select）
    pub fn select(&mut self, ids: Vec<FeatureId>) {
        self.change_mode(ModeName::SimpleSelect, ModeOptions::select(ids));
        let features = self.get_selected();
        self.fire(DrawEvent::SelectionChange {
            features,
            points: Vec::new(),
        });
    }

    /// 用户选中线上的一个顶点（进入 direct_select）
    pub fn select_vertex(&mut self, id: &FeatureId, index: usize) -> Result<(), DrawError> {
        let feature = self.features.get(id).ok_or_else(|| DrawError::FeatureNotFound(id.clone()))?;
        let len = feature.line_coordinates().map_or(0, <[LngLat]>::len);
        if index >= len {
            return Err(DrawError::InvalidGeometry {
                id: id.clone(),
                reason: format!("vertex {index} out of range (line has {len} coordinates)"),
            });
        }

        self.change_mode(ModeName::DirectSelect, ModeOptions::direct(id.clone()));
        self.selected_coords = vec![index];
        let features = self.get_selected();
        let points = self.get_selected_points();
        self.fire(DrawEvent::SelectionChange { features, points });
        Ok(())
    }

    /// 用户拖动线上的一个顶点
    pub fn move_vertex(&mut self, id: &FeatureId, index: usize, to: LngLat) -> Result<(), DrawError> {
        let feature = self.features.get_mut(id).ok_or_else(|| DrawError::FeatureNotFound(id.clone()))?;
        let vertex = feature
            .geometry
            .line_coordinates_mut()
            .and_then(|coords| coords.get_mut(index))
            .ok_or_else(|| DrawError::InvalidGeometry {
                id: id.clone(),
                reason: format!("no vertex at index {index}"),
            })?;
        *vertex = to;

        let snapshot = feature.clone();
        self.fire(DrawEvent::Update {
            features: vec![snapshot],
            action: UpdateAction::ChangeCoordinates,
        });
        Ok(())
    }

    /// 用户删除选中的要素
    pub fn trash(&mut self) {
        let ids = std::mem::take(&mut self.selected);
        if ids.is_empty() {
            return;
        }
        let removed: Vec<Feature> = ids.iter().filter_map(|id| self.features.shift_remove(id)).collect();
        self.selected_coords.clear();
        debug!(count = removed.len(), "trashed selected features");
        self.fire(DrawEvent::Delete { features: removed });
    }

    // ========== GeoJSON 交换 ==========

    pub fn to_feature_collection(&self) -> geojson::FeatureCollection {
        geojson::FeatureCollection {
            bbox: None,
            features: self.features.values().map(geojson::Feature::from).collect(),
            foreign_members: None,
        }
    }

    /// 载入要素集合
    ///
    /// 先转换并校验全部要素，任何一个失败则不写入。
    pub fn load_feature_collection(
        &mut self,
        collection: &geojson::FeatureCollection,
    ) -> Result<Vec<FeatureId>, DrawError> {
        let features = collection
            .features
            .iter()
            .map(|f| {
                let feature = Feature::try_from(f)?;
                feature.validate()?;
                Ok(feature)
            })
            .collect::<Result<Vec<_>, DrawError>>()?;

        let ids = features.iter().map(|f| f.id.clone()).collect();
        for feature in features {
            self.features.insert(feature.id.clone(), feature);
        }
        info!(count = self.features.len(), "loaded feature collection");
        Ok(ids)
    }
}

impl DrawControl for FeatureStore {
    fn get(&self, id: &FeatureId) -> Option<Feature> {
        self.features.get(id).cloned()
    }

    fn get_all(&self) -> Vec<Feature> {
        self.features.values().cloned().collect()
    }

    fn add(&mut self, feature: Feature) -> Result<FeatureId, DrawError> {
        feature.validate()?;
        let id = feature.id.clone();
        let replaced = self.features.insert(id.clone(), feature).is_some();
        debug!(%id, replaced, "feature added");
        Ok(id)
    }

    fn delete(&mut self, ids: &[FeatureId]) {
        for id in ids {
            self.features.shift_remove(id);
        }
        self.selected.retain(|id| !ids.contains(id));
        if self.selected.is_empty() {
            self.selected_coords.clear();
        }
    }

    fn set_feature_property(&mut self, id: &FeatureId, key: &str, value: Value) -> Result<(), DrawError> {
        let feature = self
            .features
            .get_mut(id)
            .ok_or_else(|| DrawError::FeatureNotFound(id.clone()))?;
        feature.properties.insert(key.to_string(), value);
        Ok(())
    }

    fn change_mode(&mut self, mode: ModeName, options: ModeOptions) {
        self.selected_coords.clear();
        self.selected = match mode {
            ModeName::SimpleSelect => options
                .feature_ids
                .iter()
                .filter(|id| self.features.contains_key(*id))
                .cloned()
                .collect(),
            ModeName::DirectSelect => options
                .feature_id
                .iter()
                .filter(|id| self.features.contains_key(*id))
                .cloned()
                .collect(),
            ModeName::DrawLineString => Vec::new(),
        };
        debug!(from = self.mode.as_str(), to = mode.as_str(), "mode changed");
        self.mode = mode;
        self.pending_mode = Some(ModeChange { mode, options });
    }

    fn get_selected(&self) -> Vec<Feature> {
        self.features_for(&self.selected)
    }

    fn get_selected_points(&self) -> Vec<LngLat> {
        if self.mode != ModeName::DirectSelect {
            return Vec::new();
        }
        let Some(coords) = self
            .selected
            .first()
            .and_then(|id| self.features.get(id))
            .and_then(Feature::line_coordinates)
        else {
            return Vec::new();
        };
        self.selected_coords
            .iter()
            .filter_map(|&i| coords.get(i).copied())
            .collect()
    }

    fn get_mode(&self) -> ModeName {
        self.mode
    }

    fn join(&mut self, merged: Feature, absorbed: &FeatureId) -> Result<FeatureId, DrawError> {
        merged.validate()?;
        if !self.features.contains_key(absorbed) {
            return Err(DrawError::FeatureNotFound(absorbed.clone()));
        }

        self.features.shift_remove(absorbed);
        let id = merged.id.clone();
        self.features.insert(id.clone(), merged.clone());
        self.selected = vec![id.clone()];
        self.selected_coords.clear();
        info!(%id, %absorbed, "lines joined");

        self.fire(DrawEvent::SelectionChange {
            features: vec![merged],
            points: Vec::new(),
        });
        Ok(id)
    }

    fn fire(&mut self, event: DrawEvent) {
        self.events.push_back(event);
    }
}
