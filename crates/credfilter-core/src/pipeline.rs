//! 组装：扫描器 → 行缓冲 → 目标
//!
//! - [`filter`]：单线程，扫描器直接写入 [`LineWriter`]
//! - [`stream_threaded`]：扫描器在当前线程，行缓冲与目标写入在独立线程；
//!   两者之间用有界通道按 FIFO 传递字节块，保证字节顺序不变
use std::io::{self, Read, Write};

use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use crate::error::{FilterError, Result};
use crate::line_writer::LineWriter;
use crate::options::{FilterOptions, ScanStats};
use crate::scan::stream;
use crate::types::CandidateList;

/// 通道中最多排队的块数
const CHANNEL_DEPTH: usize = 64;
/// 单个块的目标大小（字节）
const BATCH_SIZE: usize = 8 * 1024;

/// 单线程运行：无论扫描成功与否都会关闭行缓冲，保证尾部字节写出
/// 扫描错误优先于关闭错误返回
pub fn filter<R: Read, W: Write>(
    input: R,
    destination: W,
    candidates: &CandidateList,
    opts: &FilterOptions,
) -> Result<ScanStats> {
    let mut out = LineWriter::with_max_line(destination, opts.max_line_bytes);
    let scanned = stream(input, &mut out, candidates, opts);
    let closed = out.close();
    let stats = scanned?;
    closed.map_err(FilterError::Write)?;
    Ok(stats)
}

/// 双线程运行：扫描与写出重叠执行
pub fn stream_threaded<R: Read, W: Write + Send>(
    input: R,
    destination: W,
    candidates: &CandidateList,
    opts: &FilterOptions,
) -> Result<ScanStats> {
    let (tx, rx) = crossbeam_channel::bounded::<Vec<u8>>(CHANNEL_DEPTH);
    let max_line = opts.max_line_bytes;

    std::thread::scope(|s| {
        let writer = s.spawn(move || write_chunks(rx, destination, max_line));

        let mut sink = ChannelWriter::new(tx);
        let scanned = stream(input, &mut sink, candidates, opts);
        // 读失败时已判定的字节仍需送达
        let _ = sink.send_pending();
        drop(sink);

        let written = match writer.join() {
            Ok(r) => r,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        // 写线程的真实错误优先于通道断开导致的扫描端错误
        if let Err(e) = written {
            return Err(FilterError::Write(e));
        }
        scanned
    })
}

fn write_chunks<W: Write>(rx: Receiver<Vec<u8>>, destination: W, max_line: Option<usize>) -> io::Result<()> {
    let mut out = LineWriter::with_max_line(destination, max_line);
    let mut chunks = 0usize;
    for chunk in rx.iter() {
        out.write_all(&chunk)?;
        chunks += 1;
    }
    debug!(chunks, "writer thread drained channel");
    out.close()
}

/// 把写入攒成块后发往写线程
/// 块满或包含换行时立即发送，行的可见延迟与单线程模式一致
struct ChannelWriter {
    tx: Sender<Vec<u8>>,
    pending: Vec<u8>,
}

impl ChannelWriter {
    fn new(tx: Sender<Vec<u8>>) -> Self {
        Self { tx, pending: Vec::with_capacity(BATCH_SIZE) }
    }

    fn send_pending(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::replace(&mut self.pending, Vec::with_capacity(BATCH_SIZE));
        self.tx
            .send(chunk)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "writer thread stopped"))
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(data);
        if self.pending.len() >= BATCH_SIZE || data.contains(&b'\n') {
            self.send_pending()?;
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.send_pending()
    }
}
