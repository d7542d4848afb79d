//! 错误类型。
//!
//! 核心层只有词库读取会失败；切分与转换对任何输入都不报错。

/// 核心层的 Result，错误类型默认为 [`Error`]。
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 读取词库源时的 I/O 错误
    #[error("读取词库失败: {0}")]
    Io(#[from] std::io::Error),

    /// 词库源不是合法 UTF-8（行号从 1 开始）
    #[error("词库第 {line} 行不是合法的 UTF-8")]
    InvalidUtf8 { line: usize },
}
