//! Thumbsync - 批量缩略图导入动作
//!
//! 作为制作追踪系统的事件插件，按照实体路径命名约定将文件夹中的图片
//! 批量设置为项目层级（项目、场次、镜头、任务）对应实体的缩略图。

pub mod action;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod models;
pub mod observability;
pub mod services;
