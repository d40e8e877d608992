//! 有界前瞻窗口
//!
//! 窗口最多保存 `cap` 个“已读取、未判定”的字节，与行长、流长无关。
use std::io::{self, Read};

pub(crate) struct Lookahead<R> {
    reader: R,
    buf: Vec<u8>,
    /// 窗口在 buf 中的起点；已消费的前缀在下一次填充时整体移除
    start: usize,
    cap: usize,
    eof: bool,
    bytes_read: u64,
}

impl<R: Read> Lookahead<R> {
    pub(crate) fn new(reader: R, cap: usize) -> Self {
        Self { reader, buf: Vec::with_capacity(cap * 2), start: 0, cap, eof: false, bytes_read: 0 }
    }

    /// 补齐窗口至 `cap` 字节（到达 EOF 时可能更少）
    pub(crate) fn fill(&mut self) -> io::Result<()> {
        if self.start >= self.cap {
            self.buf.drain(..self.start);
            self.start = 0;
        }
        while !self.eof && self.len() < self.cap {
            let need = self.cap - self.len();
            let old = self.buf.len();
            self.buf.resize(old + need, 0);
            match self.reader.read(&mut self.buf[old..]) {
                Ok(0) => {
                    self.buf.truncate(old);
                    self.eof = true;
                }
                Ok(n) => {
                    self.buf.truncate(old + n);
                    self.bytes_read += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => self.buf.truncate(old),
                Err(e) => {
                    self.buf.truncate(old);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn window(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len() - self.start
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 丢弃窗口前 n 个字节（n 不超过窗口长度）
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.len());
        self.start += n.min(self.len());
    }

    pub(crate) fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
