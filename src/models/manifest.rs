//! 项目层级清单
//!
//! 开发演练二进制用 JSON 清单描述项目树，并注入内存主机会话。

use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::error::Result;
use crate::host::memory::InMemorySession;
use crate::models::entity::Entity;

/// 层级清单节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNode {
    /// 实体名称
    pub name: String,

    /// 显示全名（仅项目节点使用）
    #[serde(default)]
    pub full_name: Option<String>,

    /// 实体类型
    #[serde(alias = "type")]
    pub entity_type: String,

    /// 子节点
    #[serde(default)]
    pub children: Vec<ManifestNode>,
}

/// 项目层级清单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// 项目根节点
    pub project: ManifestNode,
}

impl ProjectManifest {
    /// 从 JSON 文件加载清单
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// 将清单注入会话，返回项目实体 ID
    pub fn load_into(&self, session: &InMemorySession) -> String {
        let project_id = Uuid::new_v4().to_string();
        let mut project = Entity::new(&project_id, &self.project.name, &self.project.entity_type);
        if let Some(full_name) = &self.project.full_name {
            project = project.with_full_name(full_name);
        }
        session.add_entity(None, project);

        // 显式栈遍历，与层级服务保持同一形状
        let mut stack: Vec<(&ManifestNode, String)> = self
            .project
            .children
            .iter()
            .rev()
            .map(|child| (child, project_id.clone()))
            .collect();

        while let Some((node, parent_id)) = stack.pop() {
            let id = Uuid::new_v4().to_string();
            session.add_entity(Some(&parent_id), Entity::new(&id, &node.name, &node.entity_type));

            for child in node.children.iter().rev() {
                stack.push((child, id.clone()));
            }
        }

        project_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::session::HostSession;

    fn sample_manifest() -> ProjectManifest {
        serde_json::from_str(
            r#"{
                "project": {
                    "name": "show1",
                    "full_name": "Show1",
                    "type": "Project",
                    "children": [
                        {
                            "name": "0010",
                            "type": "Sequence",
                            "children": [
                                {
                                    "name": "0010.010",
                                    "type": "Shot",
                                    "children": [
                                        {"name": "0010.010.generic", "type": "Task"}
                                    ]
                                }
                            ]
                        }
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_into_builds_hierarchy() {
        let manifest = sample_manifest();
        let session = InMemorySession::new();
        let project_id = manifest.load_into(&session);

        let project = session.get_project(&project_id).await.unwrap().unwrap();
        assert_eq!(project.display_name(), "Show1");

        let sequences = session.children_of(&project_id).await.unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].name, "0010");

        let shots = session.children_of(&sequences[0].id).await.unwrap();
        assert_eq!(shots.len(), 1);

        let tasks = session.children_of(&shots[0].id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].is_task());
    }

    #[test]
    fn test_type_alias_accepted() {
        let manifest = sample_manifest();
        assert_eq!(manifest.project.entity_type, "Project");
    }
}
