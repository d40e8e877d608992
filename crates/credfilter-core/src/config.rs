//! 配置文件加载（TOML）
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::candidates::DEFAULT_ALLOW_ENV;
use crate::error::{FilterError, Result};
use crate::options::MatchEngine;

/// 配置文件结构，所有字段可选
///
/// ```toml
/// allow = ["INFO", "PATH"]
/// allow_env = "CREDENTIAL_FILTER_WHITELIST"
/// engine = "automaton"
/// max_line_bytes = 1048576
/// threaded = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// 永不脱敏的变量名
    #[serde(default)]
    pub allow: Vec<String>,
    /// 存放额外白名单（逗号分隔）的环境变量名
    #[serde(default)]
    pub allow_env: Option<String>,
    #[serde(default)]
    pub engine: Option<MatchEngine>,
    #[serde(default)]
    pub max_line_bytes: Option<usize>,
    #[serde(default)]
    pub threaded: Option<bool>,
}

impl FilterConfig {
    /// 从 TOML 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        load_file(path).map_err(|e| FilterError::Config(format!("{e:#}")))
    }

    pub fn from_toml_str(txt: &str) -> Result<Self> {
        toml::from_str(txt).map_err(|e| FilterError::Config(e.to_string()))
    }

    /// 白名单所在环境变量名（未配置则为默认值）
    pub fn allow_env(&self) -> &str {
        self.allow_env.as_deref().unwrap_or(DEFAULT_ALLOW_ENV)
    }
}

fn load_file(path: &Path) -> anyhow::Result<FilterConfig> {
    let txt = std::fs::read_to_string(path).with_context(|| format!("read config file {}", path.display()))?;
    let parsed: FilterConfig = toml::from_str(&txt).with_context(|| format!("parse config file {}", path.display()))?;
    Ok(parsed)
}
