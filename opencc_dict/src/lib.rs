//! `opencc_dict`：词典文件与转换配置的加载。
//!
//! - `config`：JSON 配置的数据结构与校验
//! - `loader`：按搜索路径查找并加载文本词库、组装词典组（带缓存）
//! - `builder`：由配置构建 `opencc_core::Converter`，查找预设
//! - `embedded`：编译进二进制的预设与词库，磁盘上找不到时使用
//!
//! 文本词库格式：
//!
//! - 每行 `key<TAB>value1 value2 ...`
//! - 空行与 `#` 开头的行被忽略；没有 TAB 的行只有 key、没有值
//! - 必须是合法 UTF-8，否则整个文件加载失败

pub mod builder;
pub mod config;
pub mod embedded;
pub mod error;
pub mod loader;

pub use builder::{
    ConfigSource, converter_from_config, default_search_paths, list_configs, load_converter,
    resolve_config,
};
pub use config::{
    Config, ConversionStepConfig, DictConfig, DictType, SegmentationConfig, SegmentationType,
};
pub use error::{LoadError, Result};
pub use loader::{DictionaryLoader, lexicon_from_path, write_dictionary};
