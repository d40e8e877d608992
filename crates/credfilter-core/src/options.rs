//! 过滤选项与统计信息（模块）
use serde::Deserialize;

/// 前缀匹配引擎
/// - Automaton：锚定的 Aho-Corasick（LeftmostLongest），每个位置一次查找。
/// - Linear：按列表顺序逐个 `starts_with`，与最长优先排序配合，首个命中即为结果。
/// 两者输出完全一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchEngine {
    #[default]
    Automaton,
    Linear,
}

/// 过滤选项
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// 前缀匹配引擎
    pub engine: MatchEngine,
    /// 行缓冲的防御性上限（字节）；None 表示不限制
    pub max_line_bytes: Option<usize>,
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// 从输入读取的字节数
    pub bytes_read: u64,
    /// 写往输出的字节数（含替换文本）
    pub bytes_written: u64,
    /// 替换次数
    pub redactions: u64,
}
