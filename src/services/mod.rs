//! 服务模块

pub mod hierarchy;
pub mod importer;
pub mod matcher;
pub mod scanner;

pub use hierarchy::flatten_hierarchy;
pub use importer::{
    ImportReport, ImportService, ImportServiceImpl, THUMBNAIL_COMPONENT_NAME,
    create_import_service,
};
pub use matcher::match_files;
pub use scanner::scan_folder;
