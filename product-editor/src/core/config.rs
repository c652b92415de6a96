use std::path::PathBuf;

/// Default local store quota (5 MiB, the usual browser storage budget)
pub const DEFAULT_STORE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// 配置 - 产品编辑器的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | STORE_FILE | catalog.redb | 本地存储文件名 |
/// | STORE_QUOTA_BYTES | 5242880 | 本地存储配额(字节) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志目录 |
/// | SEED_VERTICAL | (未设置) | 启动时写入的演示数据行业 |
/// | REMOTE_API_URL | (未设置) | 远程产品 API |
/// | REQUEST_TIMEOUT_MS | 10000 | 远程请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pos SEED_VERTICAL=fashion cargo run -p product-editor
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// 本地存储文件名 (相对 work_dir)
    pub store_file: String,
    /// 本地存储配额
    pub store_quota_bytes: u64,
    /// 日志级别
    pub log_level: String,
    /// 日志目录 (None = 只输出到 stdout)
    pub log_dir: Option<String>,
    /// 演示数据行业: fashion | spa | food_beverage | convenience
    pub seed_vertical: Option<String>,
    /// 远程产品 API 地址
    pub remote_api_url: Option<String>,
    /// 远程请求超时 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            store_file: std::env::var("STORE_FILE").unwrap_or_else(|_| "catalog.redb".into()),
            store_quota_bytes: std::env::var("STORE_QUOTA_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_STORE_QUOTA_BYTES),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: non_empty_var("LOG_DIR"),
            seed_vertical: non_empty_var("SEED_VERTICAL"),
            remote_api_url: non_empty_var("REMOTE_API_URL"),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        }
    }

    /// 使用自定义工作目录覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// 本地存储完整路径
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.store_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
