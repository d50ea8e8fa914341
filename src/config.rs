use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 前端地址（CORS 允许的来源）
    pub client_url: String,
    /// 数据库连接串；题库服务本身不使用，仅为兼容共享的 .env
    pub mongodb_uri: Option<String>,
    /// 额外科目 TOML 文件所在目录
    pub question_bank_dir: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            client_url: "http://localhost:5173".to_string(),
            mongodb_uri: None,
            question_bank_dir: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源读取配置，未设置或为空的变量取默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: var("HOST").unwrap_or(default.host),
            port: match var("PORT") {
                Some(v) => parse_var("PORT", &v, "u16")?,
                None => default.port,
            },
            client_url: var("CLIENT_URL").unwrap_or(default.client_url),
            mongodb_uri: var("MONGODB_URI"),
            question_bank_dir: var("QUESTION_BANK_DIR"),
            verbose_logging: match var("VERBOSE_LOGGING") {
                Some(v) => parse_var("VERBOSE_LOGGING", &v, "bool")?,
                None => default.verbose_logging,
            },
        })
    }

    /// 监听地址 `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}
