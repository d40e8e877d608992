//! 凭据过滤核心库
//!
//! 设计要点：
//! - 在字节流上实时把已知的密钥值替换为 `[redacted <name>]`，其余字节原样转发。
//! - 前瞻窗口容量等于最长密钥长度，内存占用与行长、流长无关。
//! - 候选按值长度降序排列（由 `CandidateList` 构造时保证），同一位置最长者优先，
//!   避免短密钥截走长密钥的一部分。
//! - 输出经行缓冲包装：遇换行即冲刷，关闭时写出剩余尾部。
//! - 候选集合由调用方显式构建后传入，核心从不直接读取进程环境。

mod candidates;
mod config;
mod error;
mod line_writer;
mod matcher;
mod options;
mod pipeline;
mod scan;
mod types;
mod window;

pub use candidates::{allow_list_from_env, candidates_from_env, candidates_from_pairs, AllowList, DEFAULT_ALLOW_ENV};
pub use config::FilterConfig;
pub use error::{FilterError, Result};
pub use line_writer::LineWriter;
pub use options::{FilterOptions, MatchEngine, ScanStats};
pub use pipeline::{filter, stream_threaded};
pub use scan::stream;
pub use types::{Candidate, CandidateList};
