//! 内存主机会话实现
//!
//! 用于开发演练和集成测试：层级数据驻留内存，写操作进入待提交缓冲，
//! commit 应用、rollback 丢弃，语义与真实主机会话一致。

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::Path;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::host::session::HostSession;
use crate::models::entity::{Component, Entity, Location};

/// 待提交变更
#[derive(Debug, Clone)]
enum PendingChange {
    CreateComponent(Component),
    SetThumbnail {
        entity_id: String,
        component_id: String,
    },
}

/// 内存主机会话
#[derive(Default)]
pub struct InMemorySession {
    /// 实体表（ID → 实体）
    entities: DashMap<String, Entity>,
    /// 父子关系（父 ID → 子 ID 列表，保持插入顺序）
    children: DashMap<String, Vec<String>>,
    /// 存储位置（名称 → 位置）
    locations: DashMap<String, Location>,
    /// 已提交组件
    components: DashMap<String, Component>,
    /// 已提交缩略图引用（实体 ID → 组件 ID）
    thumbnails: DashMap<String, String>,
    /// 待提交缓冲
    pending: Mutex<Vec<PendingChange>>,
}

impl InMemorySession {
    /// 创建空会话
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册实体并挂到父实体下
    pub fn add_entity(&self, parent_id: Option<&str>, entity: Entity) {
        if let Some(parent) = parent_id {
            self.children
                .entry(parent.to_string())
                .or_default()
                .push(entity.id.clone());
        }
        self.entities.insert(entity.id.clone(), entity);
    }

    /// 注册存储位置
    pub fn add_location(&self, location: Location) {
        self.locations.insert(location.name.clone(), location);
    }

    /// 查询实体已提交的缩略图组件 ID
    pub fn thumbnail_of(&self, entity_id: &str) -> Option<String> {
        self.thumbnails.get(entity_id).map(|c| c.value().clone())
    }

    /// 查询已提交组件
    pub fn component(&self, component_id: &str) -> Option<Component> {
        self.components.get(component_id).map(|c| c.value().clone())
    }

    /// 待提交变更数量
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

#[async_trait]
impl HostSession for InMemorySession {
    async fn get_project(&self, project_id: &str) -> Result<Option<Entity>> {
        Ok(self
            .entities
            .get(project_id)
            .filter(|e| e.value().is_project())
            .map(|e| e.value().clone()))
    }

    async fn children_of(&self, entity_id: &str) -> Result<Vec<Entity>> {
        let ids = match self.children.get(entity_id) {
            Some(ids) => ids.value().clone(),
            None => return Ok(vec![]),
        };

        Ok(ids
            .iter()
            .filter_map(|id| self.entities.get(id).map(|e| e.value().clone()))
            .collect())
    }

    async fn get_location(&self, name: &str) -> Result<Location> {
        self.locations
            .get(name)
            .map(|l| l.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("Location not found: {}", name)))
    }

    async fn create_component(
        &self,
        file_path: &Path,
        name: &str,
        location: &Location,
    ) -> Result<Component> {
        if !file_path.is_file() {
            return Err(AppError::Io(format!(
                "Component source is not a regular file: {}",
                file_path.display()
            )));
        }

        let component = Component {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            file_path: file_path.to_path_buf(),
            location_id: location.id.clone(),
        };

        self.pending
            .lock()
            .push(PendingChange::CreateComponent(component.clone()));

        Ok(component)
    }

    async fn set_thumbnail(&self, entity_id: &str, component_id: &str) -> Result<()> {
        if !self.entities.contains_key(entity_id) {
            return Err(AppError::NotFound(format!(
                "Entity not found: {}",
                entity_id
            )));
        }

        self.pending.lock().push(PendingChange::SetThumbnail {
            entity_id: entity_id.to_string(),
            component_id: component_id.to_string(),
        });

        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let changes: Vec<PendingChange> = self.pending.lock().drain(..).collect();

        for change in changes {
            match change {
                PendingChange::CreateComponent(component) => {
                    self.components.insert(component.id.clone(), component);
                }
                PendingChange::SetThumbnail {
                    entity_id,
                    component_id,
                } => {
                    self.thumbnails.insert(entity_id, component_id);
                }
            }
        }

        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        self.pending.lock().clear();
        Ok(())
    }
}
