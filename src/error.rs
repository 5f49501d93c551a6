use thiserror::Error;

/// 库层统一错误类型；CLI 层再用 anyhow 包装上下文
#[derive(Debug, Error)]
pub enum SimError {
    /// 长度、数量或 k 值不合法（为 0、超过基因组长度、read 长度不一致等）
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// read 的种子 k-mer 不在索引中，且比对策略为 Fail
    #[error("seed k-mer '{seed}' of read {read} not found in index")]
    SeedNotFound { read: usize, seed: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index serialization error: {0}")]
    Serialize(#[from] bincode::Error),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("format error: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// 构造 InvalidArgument 的简写
pub(crate) fn invalid(msg: impl Into<String>) -> SimError {
    SimError::InvalidArgument(msg.into())
}
