//! `opencc_core`：简繁/地区词汇转换的纯逻辑层，不访问文件系统。
//!
//! 分层：
//! - **词条与词库**：`entry` -> `lexicon`（解析、排序、查重）
//! - **词典**：`dictionary`（单一有序词典）与 `dict_group`（按优先级组合）
//! - **切分**：`segmenter` 把文本切成 `segment`（正向最大匹配 / 逐字）
//! - **转换**：`conversion` 逐段替换，`converter` 串起切分与转换链
//!
//! 词典在加载期一次构建，之后只读；可以通过 `Arc` 在任意多个线程间共享。
pub mod conversion;
pub mod converter;
pub mod dict_group;
pub mod dictionary;
pub mod entry;
pub mod error;
pub mod lexicon;
pub mod segment;
pub mod segmenter;
pub mod utf8;

pub use conversion::{Conversion, ConversionChain};
pub use converter::Converter;
pub use dict_group::DictGroup;
pub use dictionary::{Dictionary, TextDictionary};
pub use entry::{Entry, Values};
pub use error::{Error, Result};
pub use lexicon::Lexicon;
pub use segment::{Segment, Segments};
pub use segmenter::{CharacterSegmenter, MaxMatchSegmenter, Segmenter};
