use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 主机会话配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// 主机服务地址
    pub server_url: String,
    /// API 用户名（事件按用户过滤）
    pub api_user: String,
    /// API 密钥
    pub api_key: String,
    /// 组件存储位置名称
    pub location_name: String,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

/// 动作配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActionConfig {
    /// discover 订阅优先级（数值越小越先执行）
    pub priority: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件路径
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 主机会话配置
    pub host: HostConfig,
    /// 动作配置
    pub action: ActionConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            host: HostConfig {
                server_url: "https://studio.example.com".into(),
                api_user: "dev".into(),
                api_key: "dev-api-key-change-in-production".into(),
                location_name: "studio.server".into(),
                request_timeout: 30,
            },
            action: ActionConfig { priority: 100 },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "thumbsync".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config
    }
}
