//! 流式脱敏主流程
use std::io::{self, BufReader, Read, Write};

use tracing::debug;

use crate::error::{FilterError, Result};
use crate::matcher::PrefixMatcher;
use crate::options::{FilterOptions, ScanStats};
use crate::types::CandidateList;
use crate::window::Lookahead;

/// 快路径的分块大小
pub(crate) const COPY_CHUNK: usize = 64 * 1024;

/// 将 `input` 复制到 `output`，把其中每一处候选值替换为 `[redacted <name>]`
///
/// 流程：
/// - 候选为空：按块直接复制，不做任何匹配
/// - 否则维护至多 `max_len` 字节的前瞻窗口；每一步做前缀判定（最长优先），
///   命中则丢弃该段并写出替换文本，未命中则原样转发一个字节，然后补齐窗口
/// - 窗口为空且输入已到末尾时结束
///
/// 读失败与写失败分别以 [`FilterError::Read`] / [`FilterError::Write`] 返回；
/// 已经写出的内容不回滚。
pub fn stream<R: Read, W: Write>(
    input: R,
    mut output: W,
    candidates: &CandidateList,
    opts: &FilterOptions,
) -> Result<ScanStats> {
    if candidates.is_empty() {
        debug!("no candidates, copying verbatim");
        return copy_verbatim(input, output);
    }

    let matcher = PrefixMatcher::build(candidates, opts.engine);
    let mut window = Lookahead::new(BufReader::new(input), candidates.max_len());
    let mut stats = ScanStats::default();
    debug!(candidates = candidates.len(), window = candidates.max_len(), engine = ?opts.engine, "scanning");

    window.fill().map_err(FilterError::Read)?;
    while !window.is_empty() {
        match matcher.match_prefix(window.window()) {
            Some(hit) => {
                let placeholder = hit.placeholder();
                window.consume(hit.value.len());
                output.write_all(placeholder.as_bytes()).map_err(FilterError::Write)?;
                stats.bytes_written += placeholder.len() as u64;
                stats.redactions += 1;
            }
            None => {
                let byte = window.window()[0];
                window.consume(1);
                output.write_all(&[byte]).map_err(FilterError::Write)?;
                stats.bytes_written += 1;
            }
        }
        window.fill().map_err(FilterError::Read)?;
    }

    output.flush().map_err(FilterError::Write)?;
    stats.bytes_read = window.bytes_read();
    Ok(stats)
}

/// 无候选时的逐块复制（不整体读入内存），同时区分读写错误
fn copy_verbatim<R: Read, W: Write>(mut input: R, mut output: W) -> Result<ScanStats> {
    let mut stats = ScanStats::default();
    let mut buf = vec![0u8; COPY_CHUNK];
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FilterError::Read(e)),
        };
        output.write_all(&buf[..n]).map_err(FilterError::Write)?;
        stats.bytes_read += n as u64;
        stats.bytes_written += n as u64;
    }
    output.flush().map_err(FilterError::Write)?;
    Ok(stats)
}
