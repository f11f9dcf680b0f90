use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::models::entity::{Component, Entity, Location};

/// 主机会话 trait
///
/// 写操作（组件创建、缩略图赋值）进入待提交缓冲，由 `commit` 原子应用、
/// `rollback` 整体丢弃。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostSession: Send + Sync {
    /// 根据 ID 查询项目实体
    async fn get_project(&self, project_id: &str) -> Result<Option<Entity>>;

    /// 获取实体的直接子实体（保持主机返回顺序）
    async fn children_of(&self, entity_id: &str) -> Result<Vec<Entity>>;

    /// 根据名称查询存储位置
    async fn get_location(&self, name: &str) -> Result<Location>;

    /// 从文件创建组件（进入待提交缓冲）
    async fn create_component(
        &self,
        file_path: &Path,
        name: &str,
        location: &Location,
    ) -> Result<Component>;

    /// 将组件设置为实体的缩略图（进入待提交缓冲）
    async fn set_thumbnail(&self, entity_id: &str, component_id: &str) -> Result<()>;

    /// 提交所有待提交变更
    async fn commit(&self) -> Result<()>;

    /// 丢弃所有待提交变更
    async fn rollback(&self) -> Result<()>;
}
