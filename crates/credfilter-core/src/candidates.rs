//! 待脱敏集合构建：环境变量枚举 + 白名单过滤
use std::collections::BTreeSet;
use std::ffi::OsString;

use tracing::debug;

use crate::types::{Candidate, CandidateList};

/// 默认存放白名单（逗号分隔）的环境变量名
pub const DEFAULT_ALLOW_ENV: &str = "CREDENTIAL_FILTER_WHITELIST";

/// 白名单：精确匹配、区分大小写的名称集合
/// 不匹配任何变量的条目保持惰性，不视为错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: BTreeSet<String>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析逗号分隔的名称列表；空条目被忽略，其余原样保留（不做 trim）
    pub fn parse(list: &str) -> Self {
        let mut allow = Self::new();
        allow.extend_from_list(list);
        allow
    }

    pub fn extend_from_list(&mut self, list: &str) {
        for name in list.split(',').filter(|s| !s.is_empty()) {
            self.names.insert(name.to_string());
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for AllowList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.names.insert(name.into());
        }
    }
}

/// 从 (名称, 值) 对构建待脱敏列表
/// - 空值跳过
/// - 白名单中的名称跳过
/// - 结果按值长度降序排列（由 CandidateList 保证）
pub fn candidates_from_pairs<I, N, V>(pairs: I, allow: &AllowList) -> CandidateList
where
    I: IntoIterator<Item = (N, V)>,
    N: Into<String>,
    V: Into<Vec<u8>>,
{
    let mut items = Vec::new();
    for (name, value) in pairs {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            continue;
        }
        if allow.contains(&name) {
            debug!(name = %name, "allow-listed, not redacted");
            continue;
        }
        items.push(Candidate { name, value });
    }
    CandidateList::new(items)
}

/// 枚举当前进程环境构建待脱敏列表
/// 值保留原始字节（Unix 上非 UTF-8 值也按字节精确匹配）
pub fn candidates_from_env(allow: &AllowList) -> CandidateList {
    let pairs = std::env::vars_os().map(|(k, v)| (k.to_string_lossy().into_owned(), os_bytes(v)));
    let list = candidates_from_pairs(pairs, allow);
    debug!(candidates = list.len(), max_len = list.max_len(), "built candidate set from environment");
    list
}

/// 读取某个环境变量中的白名单（变量不存在则为空）
pub fn allow_list_from_env(var: &str) -> AllowList {
    match std::env::var_os(var) {
        Some(v) => AllowList::parse(&v.to_string_lossy()),
        None => AllowList::new(),
    }
}

#[cfg(unix)]
fn os_bytes(v: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    v.into_vec()
}

#[cfg(not(unix))]
fn os_bytes(v: OsString) -> Vec<u8> {
    v.to_string_lossy().into_owned().into_bytes()
}
