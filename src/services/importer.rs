//! Thumbnail Import Service
//!
//! Orchestrates one launch run: scan the folder, flatten the project
//! hierarchy, match stems to entities, create one thumbnail component per
//! stem and assign it to every entity in the group, then commit the host
//! session once. Any failure rolls the pending changes back.

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::host::session::HostSession;
use crate::observability::AppMetrics;
use crate::services::{hierarchy, matcher, scanner};

/// Fixed name of the component referenced by an entity's thumbnail attribute
pub const THUMBNAIL_COMPONENT_NAME: &str = "thumbnail";

/// Outcome counts for one import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Regular files found in the folder
    pub files_scanned: usize,
    /// Thumbnail components created (one per matched stem)
    pub components_created: usize,
    /// Entities whose thumbnail reference was assigned
    pub entities_updated: usize,
    /// File stems that matched no entity path
    pub unmatched_files: Vec<String>,
}

/// 导入服务 trait
#[async_trait]
pub trait ImportService: Send + Sync {
    /// Import the folder's images as thumbnails of the project hierarchy
    async fn import_thumbnails(&self, project_id: &str, folder_path: &Path)
    -> Result<ImportReport>;
}

/// 导入服务实现
pub struct ImportServiceImpl {
    session: Arc<dyn HostSession>,
    location_name: String,
    metrics: Arc<AppMetrics>,
}

impl ImportServiceImpl {
    /// 创建新的服务实例
    pub fn new(session: Arc<dyn HostSession>, location_name: &str, metrics: Arc<AppMetrics>) -> Self {
        Self {
            session,
            location_name: location_name.to_string(),
            metrics,
        }
    }

    async fn process(&self, project_id: &str, folder_path: &Path) -> Result<ImportReport> {
        // 1. 解析项目实体
        let project = self
            .session
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project not found: {}", project_id)))?;
        tracing::info!(
            "Importing thumbnails for project '{}' from {}",
            project.display_name(),
            folder_path.display()
        );

        // 2. 扫描文件夹，展平层级，匹配
        let files = scanner::scan_folder(folder_path)?;
        let entity_paths = hierarchy::flatten_hierarchy(self.session.as_ref(), &project).await?;
        let matches = matcher::match_files(&entity_paths, &files);

        let location = self.session.get_location(&self.location_name).await?;

        let mut report = ImportReport {
            files_scanned: files.len(),
            ..Default::default()
        };

        // 3. 每个词干只创建一个组件，整组实体复用同一引用
        for (stem, entities) in &matches {
            let file = &files[stem];
            let component = self
                .session
                .create_component(file, THUMBNAIL_COMPONENT_NAME, &location)
                .await?;
            self.metrics.record_component_created();
            report.components_created += 1;

            for entity in entities {
                tracing::debug!(
                    "Setting thumbnail '{}' for entity '{}'",
                    file.display(),
                    entity
                );
                self.session.set_thumbnail(&entity.id, &component.id).await?;
                self.metrics.record_thumbnail_assigned();
                report.entities_updated += 1;
            }
        }

        report.unmatched_files = files
            .keys()
            .filter(|stem| !matches.contains_key(*stem))
            .cloned()
            .collect();
        report.unmatched_files.sort();

        // 4. 单次提交全部待提交变更
        self.session.commit().await?;

        Ok(report)
    }
}

#[async_trait]
impl ImportService for ImportServiceImpl {
    async fn import_thumbnails(
        &self,
        project_id: &str,
        folder_path: &Path,
    ) -> Result<ImportReport> {
        match self.process(project_id, folder_path).await {
            Ok(report) => {
                tracing::info!(
                    "Import finished: {} component(s), {} entity update(s), {} unmatched file(s)",
                    report.components_created,
                    report.entities_updated,
                    report.unmatched_files.len()
                );
                Ok(report)
            }
            Err(err) => {
                self.metrics.record_import_failure();
                tracing::error!("Error during thumbnail import: {}", err);
                if let Err(rollback_err) = self.session.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

/// 创建导入服务
pub fn create_import_service(
    session: Arc<dyn HostSession>,
    location_name: &str,
    metrics: Arc<AppMetrics>,
) -> Box<dyn ImportService> {
    Box::new(ImportServiceImpl::new(session, location_name, metrics))
}
