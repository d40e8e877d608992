//! 按行冲刷的输出包装
//!
//! 写入先进入内部缓冲；每当缓冲中出现换行，就把截至最后一个换行（含）的部分
//! 一次性写给下游。没有换行的尾部保留到 [`LineWriter::close`] 时写出且只写一次。
//! 下游（进程监管、日志采集）因此总能看到完整的行。
use std::io::{self, Write};

pub struct LineWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
    /// 未结束行的防御性上限；超出时不等换行直接冲刷
    max_line: Option<usize>,
    closed: bool,
    /// 下游写失败后记录错误类型，之后不再写入
    poisoned: Option<io::ErrorKind>,
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_max_line(inner, None)
    }

    pub fn with_max_line(inner: W, max_line: Option<usize>) -> Self {
        Self { inner, buf: Vec::new(), max_line, closed: false, poisoned: None }
    }

    /// 写出剩余的未结束行并冲刷下游
    ///
    /// 必须在每条退出路径上调用；重复调用是空操作。若调用方遗漏，
    /// `Drop` 会兜底调用一次（该路径上的错误被丢弃）。
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.poisoned.is_some() {
            self.buf.clear();
            return Ok(());
        }
        if !self.buf.is_empty() {
            self.emit(self.buf.len())?;
        }
        self.inner.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// 尚未写出的字节数
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn emit(&mut self, end: usize) -> io::Result<()> {
        if let Err(e) = self.inner.write_all(&self.buf[..end]) {
            self.poisoned = Some(e.kind());
            return Err(e);
        }
        self.buf.drain(..end);
        Ok(())
    }

    fn check_usable(&self) -> io::Result<()> {
        if let Some(kind) = self.poisoned {
            return Err(io::Error::new(kind, "line writer stopped after an earlier write failure"));
        }
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::Other, "line writer already closed"));
        }
        Ok(())
    }
}

impl<W: Write> Write for LineWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.check_usable()?;
        if data.is_empty() {
            return Ok(0);
        }
        self.buf.extend_from_slice(data);

        // 旧尾部不含换行，只需在新数据里找最后一个
        let mut end = match data.iter().rposition(|&b| b == b'\n') {
            Some(i) => self.buf.len() - data.len() + i + 1,
            None => 0,
        };
        if let Some(max) = self.max_line {
            if self.buf.len() - end > max {
                end = self.buf.len();
            }
        }
        if end > 0 {
            self.emit(end)?;
        }
        Ok(data.len())
    }

    /// 只冲刷下游，不写出未结束的行
    fn flush(&mut self) -> io::Result<()> {
        if let Some(kind) = self.poisoned {
            return Err(io::Error::new(kind, "line writer stopped after an earlier write failure"));
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for LineWriter<W> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.close();
        }
    }
}
