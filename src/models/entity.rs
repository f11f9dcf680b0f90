//! 实体与组件数据模型
//!
//! 实体由主机会话拥有，本插件只读取层级结构并写入缩略图引用。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// 制作层级中的实体节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// 实体唯一标识
    pub id: String,

    /// 实体名称（用于构建点分路径）
    pub name: String,

    /// 显示全名（仅项目实体携带）
    pub full_name: Option<String>,

    /// 实体类型（主机词汇，大小写不敏感：Project / Sequence / Shot / Task …）
    pub entity_type: String,
}

impl Entity {
    /// 创建新实体
    pub fn new(id: &str, name: &str, entity_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            full_name: None,
            entity_type: entity_type.to_string(),
        }
    }

    /// 设置显示全名
    pub fn with_full_name(mut self, full_name: &str) -> Self {
        self.full_name = Some(full_name.to_string());
        self
    }

    /// 显示名称：优先使用全名
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    /// 是否为任务类型（任务在层级遍历中视为叶子）
    pub fn is_task(&self) -> bool {
        self.entity_type.eq_ignore_ascii_case("task")
    }

    /// 是否为项目类型
    pub fn is_project(&self) -> bool {
        self.entity_type.eq_ignore_ascii_case("project")
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.entity_type)
    }
}

/// 组件：已上传的文件对象，由实体的缩略图属性引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// 组件唯一标识
    pub id: String,

    /// 组件名称（缩略图组件固定为 "thumbnail"）
    pub name: String,

    /// 源文件路径
    pub file_path: PathBuf,

    /// 存储位置标识
    pub location_id: String,
}

/// 组件存储位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// 位置唯一标识
    pub id: String,

    /// 位置名称
    pub name: String,
}

impl Location {
    /// 创建新存储位置
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_full_name() {
        let project = Entity::new("p-1", "show1", "Project").with_full_name("Show1");
        assert_eq!(project.display_name(), "Show1");

        let shot = Entity::new("s-1", "0010.010", "Shot");
        assert_eq!(shot.display_name(), "0010.010");
    }

    #[test]
    fn test_is_task_case_insensitive() {
        assert!(Entity::new("t-1", "generic", "Task").is_task());
        assert!(Entity::new("t-2", "generic", "TASK").is_task());
        assert!(!Entity::new("s-1", "0010", "Sequence").is_task());
    }
}
