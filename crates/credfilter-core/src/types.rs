//! 公共类型：待脱敏项与有序列表
use std::fmt;

/// 单个待脱敏项（名称 + 原始字节值）
#[derive(Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub value: Vec<u8>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    /// 替换文本：`[redacted <name>]`
    pub fn placeholder(&self) -> String {
        format!("[redacted {}]", self.name)
    }
}

// 手写 Debug：只打印名称与长度，避免密钥出现在日志或 panic 信息中
impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("len", &self.value.len())
            .finish()
    }
}

/// 按值长度降序排列的待脱敏列表
///
/// 唯一的构造入口 [`CandidateList::new`] 负责排序，因此任何 `CandidateList`
/// 都满足“最长优先”的不变量，扫描器无需信任调用方：
/// - 丢弃空值
/// - 长度降序 → 名称升序 → 原始顺序（稳定排序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    items: Vec<Candidate>,
}

impl CandidateList {
    pub fn new(mut items: Vec<Candidate>) -> Self {
        items.retain(|c| !c.value.is_empty());
        items.sort_by(|a, b| {
            use std::cmp::Ordering;
            match b.value.len().cmp(&a.value.len()) {
                Ordering::Equal => a.name.cmp(&b.name),
                o => o,
            }
        });
        Self { items }
    }

    /// 最长值的长度（即前瞻窗口容量）；空列表为 0
    pub fn max_len(&self) -> usize {
        self.items.first().map(|c| c.value.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.items
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|c| c.name.as_str())
    }
}

impl FromIterator<Candidate> for CandidateList {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
