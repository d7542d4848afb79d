//! 内置的预设与词库，编译进二进制；磁盘上找不到时作为后备。

use std::path::Path;

const CONFIGS: &[(&str, &str)] = &[
    ("s2t", include_str!("../data/config/s2t.json")),
    ("s2tw", include_str!("../data/config/s2tw.json")),
    ("t2s", include_str!("../data/config/t2s.json")),
    ("tw2s", include_str!("../data/config/tw2s.json")),
];

const DICTIONARIES: &[(&str, &str)] = &[
    ("STCharacters", include_str!("../data/dictionary/STCharacters.txt")),
    ("STPhrases", include_str!("../data/dictionary/STPhrases.txt")),
    ("TSCharacters", include_str!("../data/dictionary/TSCharacters.txt")),
    ("TSPhrases", include_str!("../data/dictionary/TSPhrases.txt")),
    ("TWVariants", include_str!("../data/dictionary/TWVariants.txt")),
    ("TWVariantsRev", include_str!("../data/dictionary/TWVariantsRev.txt")),
];

/// 按预设名取内置配置的 JSON；名字可以带 `.json`。
pub fn config(name: &str) -> Option<&'static str> {
    let name = name.strip_suffix(".json").unwrap_or(name);
    lookup(CONFIGS, name)
}

/// 内置预设名，已排序。
pub fn config_names() -> impl Iterator<Item = &'static str> {
    CONFIGS.iter().map(|(name, _)| *name)
}

/// 一份内置词库的句柄。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmbeddedDict {
    index: usize,
}

impl EmbeddedDict {
    pub fn name(self) -> &'static str {
        DICTIONARIES[self.index].0
    }

    pub fn text(self) -> &'static str {
        DICTIONARIES[self.index].1
    }
}

/// 按文件名取内置词库；只看文件名去掉扩展名的部分（`STPhrases.ocd2` 也能取到）。
pub fn dictionary(file: &str) -> Option<EmbeddedDict> {
    let stem = Path::new(file).file_stem()?.to_str()?;
    DICTIONARIES
        .iter()
        .position(|(name, _)| *name == stem)
        .map(|index| EmbeddedDict { index })
}

fn lookup(table: &[(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
}
