use std::path::PathBuf;

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

/// 加载配置与词典时的错误。任何一个都会让整次加载失败，不会得到半成品。
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("无法读取 '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("词库 '{}' 读写失败: {source}", .path.display())]
    Lexicon {
        path: PathBuf,
        #[source]
        source: opencc_core::Error,
    },

    #[error("配置 JSON 无效: {0}")]
    Json(#[from] serde_json::Error),

    #[error("找不到词典文件 '{file}'（已搜索: {searched:?}）")]
    DictionaryNotFound { file: String, searched: Vec<PathBuf> },

    #[error("找不到配置 '{0}'")]
    ConfigNotFound(String),

    #[error("配置缺少字段 `{0}`")]
    MissingField(&'static str),

    #[error("词典 '{}' 中存在重复的 key '{key}'", .path.display())]
    DuplicateKey { path: PathBuf, key: String },
}
