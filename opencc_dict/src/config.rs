//! `config`：转换配置（JSON）。
//!
//! 结构：
//! ```json
//! {
//!     "name": "Simplified Chinese to Traditional Chinese",
//!     "segmentation": {
//!         "type": "mmseg",
//!         "dict": { "type": "text", "file": "STPhrases.txt" }
//!     },
//!     "conversion_chain": [
//!         { "dict": { "type": "group", "dicts": [
//!             { "type": "text", "file": "STPhrases.txt" },
//!             { "type": "text", "file": "STCharacters.txt" }
//!         ] } }
//!     ]
//! }
//! ```
//!
//! 文件名保持相对路径，由 `DictionaryLoader` 按搜索路径查找。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub segmentation: Option<SegmentationConfig>,
    #[serde(default)]
    pub conversion_chain: Vec<ConversionStepConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    #[serde(rename = "type", default)]
    pub kind: SegmentationType,
    #[serde(default)]
    pub dict: Option<DictConfig>,
}

/// 切分算法；目前只有正向最大匹配。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationType {
    #[default]
    Mmseg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictType {
    /// 文本词库（`key<TAB>values`）
    Text,
    /// 旧格式名，按文本词库处理
    Ocd,
    /// 压缩 trie 格式的占位：实际读取同名的 `.txt` 文本词库
    Ocd2,
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictConfig {
    #[serde(rename = "type")]
    pub kind: DictType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dicts: Vec<DictConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStepConfig {
    pub dict: DictConfig,
}

impl DictConfig {
    pub fn text(file: impl Into<String>) -> Self {
        Self {
            kind: DictType::Text,
            file: Some(file.into()),
            dicts: Vec::new(),
        }
    }

    pub fn group(dicts: Vec<DictConfig>) -> Self {
        Self {
            kind: DictType::Group,
            file: None,
            dicts,
        }
    }

    fn validate(&self) -> Result<()> {
        match self.kind {
            DictType::Group => self.dicts.iter().try_for_each(DictConfig::validate),
            _ if self.file.is_none() => Err(LoadError::MissingField("file")),
            _ => Ok(()),
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&s)
    }

    /// 检查必填项：切分配置及其词典；文件型词典必须给出 `file`。
    pub fn validate(&self) -> Result<()> {
        let segmentation = self
            .segmentation
            .as_ref()
            .ok_or(LoadError::MissingField("segmentation"))?;
        segmentation
            .dict
            .as_ref()
            .ok_or(LoadError::MissingField("segmentation.dict"))?
            .validate()?;
        self.conversion_chain
            .iter()
            .try_for_each(|step| step.dict.validate())
    }
}
