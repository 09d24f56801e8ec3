//! # 外部求解器调用
//!
//! 以结构化参数列表（而非 shell 字符串）调用 CFD 批处理求解器，
//! 逐行捕获 stdout 写入日志汇，返回类型化的 {退出码, 输出} 结果。
//!
//! ## 契约
//! - 进程启动失败返回类型化错误，调用方放弃该算例但继续扫掠
//! - 非零退出码不在此处判为错误，由调用方记录并继续
//! - 可选超时：超时后杀死进程并返回 `SolverTimeout`
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs`, `commands/post.rs` 使用

use crate::error::{CawixError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// 单次求解器调用结果
#[derive(Debug)]
pub struct SolverOutcome {
    /// 进程退出码，无法取得时为 -1
    pub exit_code: i32,
    /// 捕获的 stdout 行
    pub log_lines: Vec<String>,
}

impl SolverOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// 外部批处理求解器执行器
pub struct SolverRunner {
    exe: PathBuf,
    /// 许可证/并行度等固定选项，由选项字符串按空白切分
    options: Vec<String>,
    macro_dir: PathBuf,
    macro_name: String,
    timeout: Option<Duration>,
}

impl SolverRunner {
    pub fn new(
        exe: impl Into<PathBuf>,
        option_string: &str,
        macro_dir: impl Into<PathBuf>,
        macro_name: impl Into<String>,
    ) -> SolverRunner {
        SolverRunner {
            exe: exe.into(),
            options: option_string
                .split_whitespace()
                .map(|s| s.to_string())
                .collect(),
            macro_dir: macro_dir.into(),
            macro_name: macro_name.into(),
            timeout: None,
        }
    }

    /// 设置超时（秒），None 表示无限等待
    pub fn with_timeout(mut self, seconds: Option<u64>) -> SolverRunner {
        self.timeout = seconds.map(Duration::from_secs);
        self
    }

    /// 新建仿真并以批处理模式运行宏（sweep 阶段）
    pub fn run_new_batch(&self, log_sink: Option<&Path>) -> Result<SolverOutcome> {
        self.run(&["-new".to_string()], log_sink)
    }

    /// 载入既有仿真文件并以批处理模式运行宏（post 阶段）
    pub fn run_sim_batch(&self, sim_name: &str, log_sink: Option<&Path>) -> Result<SolverOutcome> {
        self.run(&[sim_name.to_string()], log_sink)
    }

    fn run(&self, leading: &[String], log_sink: Option<&Path>) -> Result<SolverOutcome> {
        let mut child = Command::new(&self.exe)
            .args(&self.options)
            .args(leading)
            .arg("-batch")
            .arg(&self.macro_name)
            .current_dir(&self.macro_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|_| CawixError::CommandNotFound {
                command: self.exe.display().to_string(),
            })?;

        // stdout 在独立线程中读取，主线程负责等待/超时
        let stdout = child.stdout.take();
        let sink_path = log_sink.map(Path::to_path_buf);
        let reader_handle = std::thread::spawn(move || -> Vec<String> {
            let mut lines = Vec::new();
            let Some(out) = stdout else {
                return lines;
            };
            let mut sink = sink_path.and_then(|p| File::create(p).ok());
            for line in BufReader::new(out).lines().map_while(|l| l.ok()) {
                if let Some(file) = sink.as_mut() {
                    let _ = writeln!(file, "{}", line);
                }
                lines.push(line);
            }
            lines
        });

        let status = match self.timeout {
            None => child.wait().map_err(|e| CawixError::CommandFailed {
                command: self.exe.display().to_string(),
                stderr: e.to_string(),
            })?,
            Some(limit) => {
                let deadline = Instant::now() + limit;
                loop {
                    let polled = child.try_wait().map_err(|e| CawixError::CommandFailed {
                        command: self.exe.display().to_string(),
                        stderr: e.to_string(),
                    })?;
                    match polled {
                        Some(status) => break status,
                        None if Instant::now() >= deadline => {
                            child.kill().ok();
                            child.wait().ok();
                            reader_handle.join().ok();
                            return Err(CawixError::SolverTimeout {
                                seconds: limit.as_secs(),
                            });
                        }
                        None => std::thread::sleep(Duration::from_millis(200)),
                    }
                }
            }
        };

        let log_lines = reader_handle.join().unwrap_or_default();

        Ok(SolverOutcome {
            exit_code: status.code().unwrap_or(-1),
            log_lines,
        })
    }
}
