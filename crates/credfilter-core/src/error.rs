//! 错误类型（区分读端 / 写端失败）
use std::io;
use thiserror::Error;

/// 过滤流程的结果类型
pub type Result<T> = std::result::Result<T, FilterError>;

/// 过滤过程中可能出现的错误
/// - 读失败与写失败分开上报，便于外层自行决定退出码
/// - 到达输入末尾不是错误
#[derive(Debug, Error)]
pub enum FilterError {
    /// 输入流在 EOF 之前出错
    #[error("failed to read from source: {0}")]
    Read(#[source] io::Error),

    /// 目标拒绝写入（包括最终冲刷）
    #[error("failed to write to destination: {0}")]
    Write(#[source] io::Error),

    /// 配置文件无法读取或解析
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FilterError {
    pub fn is_read(&self) -> bool {
        matches!(self, FilterError::Read(_))
    }

    pub fn is_write(&self) -> bool {
        matches!(self, FilterError::Write(_))
    }

    /// 底层 I/O 错误（配置错误时为 None）
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            FilterError::Read(e) | FilterError::Write(e) => Some(e),
            FilterError::Config(_) => None,
        }
    }
}
