//! 前缀匹配器（线性 / 锚定 Aho-Corasick）
//!
//! 判定问题：窗口开头是否是某个候选值？若有多个，取最长者。
//! - Linear：按最长优先顺序逐个 `starts_with`，首个命中即最长。
//! - Automaton：对去重后的值构建锚定 AC 自动机（LeftmostLongest），一次查找给出最长前缀。
//! 相同值只保留排序中第一次出现的名称，两种引擎因此命名一致。

use std::collections::HashSet;

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use tracing::{debug, warn};

use crate::options::MatchEngine;
use crate::types::{Candidate, CandidateList};

pub(crate) enum PrefixMatcher<'a> {
    Linear(&'a [Candidate]),
    Automaton {
        ac: AhoCorasick,
        /// AC 模式索引 -> candidates 下标
        owners: Vec<usize>,
        candidates: &'a [Candidate],
    },
}

impl<'a> PrefixMatcher<'a> {
    pub(crate) fn build(list: &'a CandidateList, engine: MatchEngine) -> Self {
        let candidates = list.as_slice();
        if engine == MatchEngine::Linear {
            return PrefixMatcher::Linear(candidates);
        }

        let mut seen: HashSet<&[u8]> = HashSet::new();
        let mut patterns: Vec<&[u8]> = Vec::with_capacity(candidates.len());
        let mut owners: Vec<usize> = Vec::with_capacity(candidates.len());
        for (idx, c) in candidates.iter().enumerate() {
            if seen.insert(c.value.as_slice()) {
                patterns.push(c.value.as_slice());
                owners.push(idx);
            }
        }

        let built = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .start_kind(StartKind::Anchored)
            .build(&patterns);
        match built {
            Ok(ac) => {
                debug!(patterns = patterns.len(), "built anchored prefix automaton");
                PrefixMatcher::Automaton { ac, owners, candidates }
            }
            Err(err) => {
                // 自动机构建失败时退回线性匹配，结果不变
                warn!(error = %err, "automaton build failed, using linear matcher");
                PrefixMatcher::Linear(candidates)
            }
        }
    }

    /// 返回以 `window` 开头的最长候选
    pub(crate) fn match_prefix(&self, window: &[u8]) -> Option<&'a Candidate> {
        match self {
            PrefixMatcher::Linear(candidates) => {
                let candidates: &'a [Candidate] = candidates;
                candidates.iter().find(|c| window.starts_with(&c.value))
            }
            PrefixMatcher::Automaton { ac, owners, candidates } => {
                let candidates: &'a [Candidate] = candidates;
                let m = ac.find(Input::new(window).anchored(Anchored::Yes))?;
                debug_assert_eq!(m.start(), 0);
                candidates.get(owners[m.pattern().as_usize()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(pairs: &[(&str, &str)]) -> CandidateList {
        pairs.iter().map(|(n, v)| Candidate::new(*n, *v)).collect()
    }

    fn both(list: &CandidateList) -> [PrefixMatcher<'_>; 2] {
        [PrefixMatcher::build(list, MatchEngine::Linear), PrefixMatcher::build(list, MatchEngine::Automaton)]
    }

    #[test]
    fn prefers_longest_prefix() {
        let l = list(&[("A", "ab"), ("B", "abc")]);
        for m in both(&l) {
            assert_eq!(m.match_prefix(b"abcX").map(|c| c.name.as_str()), Some("B"));
            assert_eq!(m.match_prefix(b"abX").map(|c| c.name.as_str()), Some("A"));
            assert!(m.match_prefix(b"xabc").is_none());
        }
    }

    #[test]
    fn short_window_is_a_pure_prefix_test() {
        let l = list(&[("LONG", "abcdef"), ("SHORT", "ab")]);
        for m in both(&l) {
            // 末尾只剩 3 字节：长值无法命中，短值照常命中
            assert_eq!(m.match_prefix(b"abc").map(|c| c.name.as_str()), Some("SHORT"));
            assert!(m.match_prefix(b"a").is_none());
            assert!(m.match_prefix(b"").is_none());
        }
    }

    #[test]
    fn identical_values_resolve_to_first_in_sorted_order() {
        // 同长度按名称升序，故 ALPHA 先于 BETA
        let l = list(&[("BETA", "same"), ("ALPHA", "same")]);
        for m in both(&l) {
            assert_eq!(m.match_prefix(b"same!").map(|c| c.name.as_str()), Some("ALPHA"));
        }
    }

    #[test]
    fn control_bytes_match_like_any_other() {
        let l = list(&[("ML", "line1\nline2")]);
        for m in both(&l) {
            assert_eq!(m.match_prefix(b"line1\nline2\n").map(|c| c.name.as_str()), Some("ML"));
        }
    }
}
