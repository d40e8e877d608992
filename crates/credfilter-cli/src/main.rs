use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use credfilter_core::{
    allow_list_from_env, candidates_from_env, filter, stream_threaded, FilterConfig, FilterOptions, MatchEngine,
};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

/// 命令行入口（基于 clap）
/// 从 stdin 读取，把当前环境变量的值替换为 `[redacted <NAME>]` 后写往 stdout / stderr
#[derive(Parser, Debug)]
#[command(name = "cred-filter", version, about = "Redact environment credentials from a byte stream")]
struct Cli {
    /// 输出到 stderr 而不是 stdout（兼容旧写法 `-stderr`）
    #[arg(long)]
    stderr: bool,

    /// 不脱敏的变量名，逗号分隔，可重复
    #[arg(long, value_name = "NAMES", allow_hyphen_values = true)]
    allow: Vec<String>,

    /// 存放白名单（逗号分隔）的环境变量名，默认 CREDENTIAL_FILTER_WHITELIST
    #[arg(long, value_name = "VAR")]
    allow_env: Option<String>,

    /// 配置文件路径（TOML）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 前缀匹配引擎
    #[arg(long, value_enum)]
    engine: Option<EngineArg>,

    /// 未结束行的最大缓冲字节数，超出则直接冲刷
    #[arg(long)]
    max_line_bytes: Option<usize>,

    /// 扫描与写出分两个线程执行
    #[arg(long)]
    threaded: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineArg {
    Automaton,
    Linear,
}

impl From<EngineArg> for MatchEngine {
    fn from(e: EngineArg) -> Self {
        match e {
            EngineArg::Automaton => MatchEngine::Automaton,
            EngineArg::Linear => MatchEngine::Linear,
        }
    }
}

fn main() -> Result<()> {
    // 日志只写 stderr，默认 warn，避免混入被过滤的输出
    init_tracing();
    let cli = Cli::parse_from(normalize_legacy_args(std::env::args_os()));

    // 配置优先级：命令行 > 配置文件 > 默认值
    let config = match &cli.config {
        Some(path) => FilterConfig::load(path).context("load config")?,
        None => FilterConfig::default(),
    };
    let allow_env = cli.allow_env.clone().unwrap_or_else(|| config.allow_env().to_string());
    let mut allow = allow_list_from_env(&allow_env);
    allow.extend(config.allow.iter().cloned());
    for list in &cli.allow {
        allow.extend_from_list(list);
    }

    let candidates = candidates_from_env(&allow);
    let opts = FilterOptions {
        engine: cli.engine.map(MatchEngine::from).or(config.engine).unwrap_or_default(),
        max_line_bytes: cli.max_line_bytes.or(config.max_line_bytes),
    };
    let threaded = cli.threaded || config.threaded.unwrap_or(false);
    debug!(candidates = candidates.len(), allowed = allow.len(), stderr = cli.stderr, threaded, "starting filter");

    let destination: Box<dyn Write + Send> = if cli.stderr { Box::new(io::stderr()) } else { Box::new(io::stdout()) };
    let stdin = io::stdin();
    let stats = if threaded {
        stream_threaded(stdin.lock(), destination, &candidates, &opts)
    } else {
        filter(stdin.lock(), destination, &candidates, &opts)
    }
    .context("filter stream")?;

    debug!(
        bytes_read = stats.bytes_read,
        bytes_written = stats.bytes_written,
        redactions = stats.redactions,
        "filter finished"
    );
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 旧版本使用单横线 `-stderr`，且只认程序名之后的第一个参数；
/// 该位置上的 `-stderr` 在交给 clap 之前改写为 `--stderr`，其余参数原样保留
fn normalize_legacy_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut args: Vec<OsString> = args.into_iter().collect();
    if let Some(first) = args.get_mut(1) {
        if first.as_os_str() == "-stderr" {
            *first = OsString::from("--stderr");
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn legacy_stderr_flag_is_rewritten() {
        let args = normalize_legacy_args(os(&["cred-filter", "-stderr"]));
        let cli = Cli::parse_from(args);
        assert!(cli.stderr);
    }

    #[test]
    fn legacy_flag_is_only_rewritten_in_first_position() {
        let args = normalize_legacy_args(os(&["cred-filter", "--allow", "-stderr"]));
        assert_eq!(args, os(&["cred-filter", "--allow", "-stderr"]));
        let cli = Cli::parse_from(args);
        assert!(!cli.stderr);
        assert_eq!(cli.allow, vec!["-stderr"]);

        let args = normalize_legacy_args(os(&["cred-filter", "-stderr", "--allow", "A"]));
        assert_eq!(args, os(&["cred-filter", "--stderr", "--allow", "A"]));
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from(os(&[
            "cred-filter",
            "--allow",
            "A,B",
            "--allow",
            "C",
            "--engine",
            "linear",
            "--max-line-bytes",
            "10",
            "--threaded",
        ]));
        assert!(!cli.stderr);
        assert_eq!(cli.allow, vec!["A,B", "C"]);
        assert!(matches!(cli.engine, Some(EngineArg::Linear)));
        assert_eq!(cli.max_line_bytes, Some(10));
        assert!(cli.threaded);
    }

    #[test]
    fn defaults_leave_config_in_charge() {
        let cli = Cli::parse_from(os(&["cred-filter"]));
        assert!(cli.engine.is_none());
        assert!(cli.config.is_none());
        assert!(cli.allow_env.is_none());
    }
}
