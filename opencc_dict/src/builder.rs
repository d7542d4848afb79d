//! 按配置组装 `Converter`，以及配置文件（预设）的查找。

use std::fs;
use std::path::{Path, PathBuf};

use opencc_core::{Conversion, ConversionChain, Converter, MaxMatchSegmenter, Segmenter};

use crate::config::{Config, SegmentationType};
use crate::embedded;
use crate::error::{LoadError, Result};
use crate::loader::DictionaryLoader;

/// 用已解析的配置构建转换器。配置无效或任一词典加载失败都会返回错误。
pub fn converter_from_config(config: &Config, loader: &mut DictionaryLoader) -> Result<Converter> {
    config.validate()?;
    let segmentation = config
        .segmentation
        .as_ref()
        .ok_or(LoadError::MissingField("segmentation"))?;
    let seg_dict = segmentation
        .dict
        .as_ref()
        .ok_or(LoadError::MissingField("segmentation.dict"))?;

    let segmenter: Box<dyn Segmenter> = match segmentation.kind {
        SegmentationType::Mmseg => Box::new(MaxMatchSegmenter::new(loader.load(seg_dict)?)),
    };

    let conversions = config
        .conversion_chain
        .iter()
        .map(|step| loader.load(&step.dict).map(Conversion::new))
        .collect::<Result<Vec<_>>>()?;
    if conversions.is_empty() {
        tracing::warn!(name = %config.name, "conversion chain is empty, text will pass through unchanged");
    }

    tracing::info!(name = %config.name, steps = conversions.len(), "converter ready");
    Ok(Converter::new(
        config.name.clone(),
        segmenter,
        ConversionChain::new(conversions),
    ))
}

/// 配置文件对应的默认词典搜索路径：
/// 配置所在目录、`<配置目录>/../dictionary`、`data`、`data/dictionary`。
pub fn default_search_paths(config_path: &Path) -> Vec<PathBuf> {
    let config_dir = match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    vec![
        config_dir.clone(),
        config_dir.join("..").join("dictionary"),
        PathBuf::from("data"),
        PathBuf::from("data").join("dictionary"),
    ]
}

/// 读取配置文件并构建转换器；`extra_paths` 追加在默认搜索路径之后。
///
/// 搜索路径里都找不到的词库会退回内置词库。
pub fn load_converter(config_path: impl AsRef<Path>, extra_paths: &[PathBuf]) -> Result<Converter> {
    let config_path = config_path.as_ref();
    let config = Config::from_path(config_path)?;
    let mut search_paths = default_search_paths(config_path);
    search_paths.extend_from_slice(extra_paths);
    let mut loader = DictionaryLoader::new(search_paths).embedded(true);
    converter_from_config(&config, &mut loader)
}

/// 配置的来源：磁盘上的文件或内置预设。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded(&'static str),
}

impl ConfigSource {
    /// 构建转换器。内置预设的词库先在 `extra_paths` 里找，找不到再用内置词库。
    pub fn load_converter(&self, extra_paths: &[PathBuf]) -> Result<Converter> {
        match self {
            ConfigSource::File(path) => load_converter(path, extra_paths),
            ConfigSource::Embedded(name) => {
                let json = embedded::config(name)
                    .ok_or_else(|| LoadError::ConfigNotFound((*name).to_owned()))?;
                let config = Config::from_json_str(json)?;
                let mut loader = DictionaryLoader::new(extra_paths.to_vec()).embedded(true);
                converter_from_config(&config, &mut loader)
            }
        }
    }
}

/// 把预设名或路径解析为配置来源。
///
/// - 存在的文件路径直接使用
/// - 否则在 `config_dirs` 中依次查找 `<name>` 与 `<name>.json`
/// - 最后查内置预设
pub fn resolve_config(name: &str, config_dirs: &[PathBuf]) -> Result<ConfigSource> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(ConfigSource::File(direct.to_path_buf()));
    }
    let with_ext = format!("{name}.json");
    let on_disk = config_dirs
        .iter()
        .flat_map(|dir| [dir.join(name), dir.join(&with_ext)])
        .find(|candidate| candidate.is_file());
    if let Some(path) = on_disk {
        return Ok(ConfigSource::File(path));
    }
    let preset = name.strip_suffix(".json").unwrap_or(name);
    embedded::config_names()
        .find(|builtin| *builtin == preset)
        .map(ConfigSource::Embedded)
        .ok_or_else(|| LoadError::ConfigNotFound(name.to_owned()))
}

/// 列出可用的预设：目录中 `*.json` 的文件名（不含扩展名）加上内置预设，排序去重。
///
/// 不存在的目录会被跳过。
pub fn list_configs(config_dirs: &[PathBuf]) -> Result<Vec<String>> {
    let mut names: Vec<String> = embedded::config_names().map(str::to_owned).collect();
    for dir in config_dirs.iter().filter(|dir| dir.is_dir()) {
        let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
            path: dir.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|source| LoadError::Io {
                    path: dir.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
    }
    names.sort();
    names.dedup();
    Ok(names)
}
