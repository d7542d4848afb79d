use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use opencc_core::{DictGroup, Dictionary, Lexicon, TextDictionary};

use crate::config::{DictConfig, DictType};
use crate::embedded::{self, EmbeddedDict};
use crate::error::{LoadError, Result};

/// 从文本词库文件读出词条（未排序）。
///
/// 文件不存在、读取失败、非法 UTF-8 都会中止加载。
pub fn lexicon_from_path(path: impl AsRef<Path>) -> Result<Lexicon> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Lexicon::from_reader(BufReader::new(file)).map_err(|source| LoadError::Lexicon {
        path: path.to_path_buf(),
        source,
    })
}

/// 把词典的全部词条按文本词库格式写到文件。
pub fn write_dictionary(path: impl AsRef<Path>, dict: &dyn Dictionary) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    dict.lexicon()
        .write_to(BufWriter::new(file))
        .map_err(|source| LoadError::Lexicon {
            path: path.to_path_buf(),
            source,
        })
}

/// 词典加载器：按搜索路径找文件，按配置组装词典。
///
/// - 同一个文件只解析一次，之后返回共享的 `Arc`
/// - `strict` 打开时检查重复 key；默认不检查（重复 key 的查询结果不确定）
/// - `embedded` 打开时，搜索路径里找不到的文件改用内置词库
#[derive(Debug, Default)]
pub struct DictionaryLoader {
    search_paths: Vec<PathBuf>,
    strict: bool,
    embedded: bool,
    cache: HashMap<Source, Arc<TextDictionary>>,
}

/// 词库来源，也是缓存的 key。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Source {
    File(PathBuf),
    Embedded(EmbeddedDict),
}

impl DictionaryLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            ..Self::default()
        }
    }

    /// 加载时拒绝含重复 key 的词库。
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 磁盘上找不到时退回内置词库。
    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// 绝对路径直接检查是否存在；相对路径依次在搜索路径下查找。
    pub fn find_file(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() {
            return path.is_file().then(|| path.to_path_buf());
        }
        self.search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
    }

    fn find_source(&self, name: &str) -> Option<Source> {
        match self.find_file(name) {
            Some(path) => Some(Source::File(path)),
            None if self.embedded => embedded::dictionary(name).map(Source::Embedded),
            None => None,
        }
    }

    /// 加载文本词库：解析、排序、（可选）查重，然后构建 `TextDictionary`。
    pub fn load_text(&mut self, name: &str) -> Result<Arc<TextDictionary>> {
        let source = self
            .find_source(name)
            .ok_or_else(|| LoadError::DictionaryNotFound {
                file: name.to_owned(),
                searched: self.search_paths.clone(),
            })?;
        if let Some(dict) = self.cache.get(&source) {
            tracing::debug!(?source, "dictionary cache hit");
            return Ok(Arc::clone(dict));
        }

        let (mut lexicon, origin) = match &source {
            Source::File(path) => (lexicon_from_path(path)?, path.clone()),
            Source::Embedded(dict) => {
                let origin = PathBuf::from(dict.name());
                let lexicon = Lexicon::from_reader(dict.text().as_bytes()).map_err(|source| {
                    LoadError::Lexicon {
                        path: origin.clone(),
                        source,
                    }
                })?;
                (lexicon, origin)
            }
        };
        lexicon.sort();
        if self.strict {
            if let Some(key) = lexicon.find_duplicate_key() {
                return Err(LoadError::DuplicateKey {
                    path: origin,
                    key: key.to_owned(),
                });
            }
        }
        tracing::debug!(?source, entries = lexicon.len(), "dictionary loaded");
        let dict = Arc::new(TextDictionary::new(lexicon));
        self.cache.insert(source, Arc::clone(&dict));
        Ok(dict)
    }

    /// 按配置加载词典（词典组递归加载成员）。
    pub fn load(&mut self, config: &DictConfig) -> Result<Arc<dyn Dictionary>> {
        let file = || config.file.as_deref().ok_or(LoadError::MissingField("file"));
        let dict: Arc<dyn Dictionary> = match config.kind {
            DictType::Text | DictType::Ocd => self.load_text(file()?)?,
            DictType::Ocd2 => {
                // 不支持 trie 二进制格式：文件本身按文本词库读，不存在时改读同名的 .txt
                let name = file()?;
                if self.find_file(name).is_some() {
                    self.load_text(name)?
                } else {
                    let text = Path::new(name).with_extension("txt");
                    let text = text.to_string_lossy();
                    tracing::debug!(file = name, fallback = %text, "ocd2 falls back to text dictionary");
                    self.load_text(&text)?
                }
            }
            DictType::Group => {
                let members = config
                    .dicts
                    .iter()
                    .map(|member| self.load(member))
                    .collect::<Result<Vec<_>>>()?;
                Arc::new(DictGroup::new(members))
            }
        };
        Ok(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_text_sorts_and_caches() {
        let dir = tempdir().unwrap();
        write(dir.path(), "st.txt", "汉字\t漢字\n简体\t簡體\n发\t髪 發\n");
        let mut loader = DictionaryLoader::new(vec![dir.path().to_path_buf()]);

        let dict = loader.load_text("st.txt").unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.lexicon().is_sorted());
        assert_eq!(
            dict.match_exact("简体".as_bytes()).unwrap().default_value(),
            "簡體"
        );

        let again = loader.load_text("st.txt").unwrap();
        assert!(Arc::ptr_eq(&dict, &again));
    }

    #[test]
    fn search_paths_are_tried_in_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        write(second.path(), "a.txt", "a\tfrom-second\n");
        let mut loader =
            DictionaryLoader::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(loader.find_file("a.txt"), Some(second.path().join("a.txt")));

        write(first.path(), "a.txt", "a\tfrom-first\n");
        let dict = loader.load_text("a.txt").unwrap();
        assert_eq!(dict.match_exact(b"a").unwrap().default_value(), "from-first");
    }

    #[test]
    fn absolute_path_is_used_directly() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "abs.txt", "x\ty\n");
        let mut loader = DictionaryLoader::default();
        let dict = loader.load_text(path.to_str().unwrap()).unwrap();
        assert_eq!(dict.match_exact(b"x").unwrap().default_value(), "y");
    }

    #[test]
    fn missing_file_names_searched_paths() {
        let dir = tempdir().unwrap();
        let mut loader = DictionaryLoader::new(vec![dir.path().to_path_buf()]);
        match loader.load_text("missing.txt") {
            Err(LoadError::DictionaryNotFound { file, searched }) => {
                assert_eq!(file, "missing.txt");
                assert_eq!(searched, [dir.path().to_path_buf()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_aborts_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.txt"), b"a\tA\n\xfe\tB\n").unwrap();
        let mut loader = DictionaryLoader::new(vec![dir.path().to_path_buf()]);
        assert!(matches!(
            loader.load_text("bad.txt"),
            Err(LoadError::Lexicon { .. })
        ));
    }

    #[test]
    fn duplicates_only_rejected_when_strict() {
        let dir = tempdir().unwrap();
        write(dir.path(), "dup.txt", "a\tA\nb\tB\na\tX\n");

        let mut lenient = DictionaryLoader::new(vec![dir.path().to_path_buf()]);
        assert_eq!(lenient.load_text("dup.txt").unwrap().len(), 3);

        let mut strict = DictionaryLoader::new(vec![dir.path().to_path_buf()]).strict(true);
        match strict.load_text("dup.txt") {
            Err(LoadError::DuplicateKey { key, .. }) => assert_eq!(key, "a"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn load_group_and_ocd2_placeholder() {
        let dir = tempdir().unwrap();
        write(dir.path(), "phrases.txt", "头发\t頭髮\n");
        write(dir.path(), "chars.txt", "发\t發 髮\n头\t頭\n");
        let mut loader = DictionaryLoader::new(vec![dir.path().to_path_buf()]);

        let config = DictConfig::group(vec![
            DictConfig {
                kind: DictType::Ocd2,
                file: Some("phrases.ocd2".into()),
                dicts: Vec::new(),
            },
            DictConfig::text("chars.txt"),
        ]);
        let group = loader.load(&config).unwrap();
        assert_eq!(group.max_key_length(), 6);
        assert_eq!(
            group.match_prefix("头发长".as_bytes()).unwrap().default_value(),
            "頭髮"
        );
        assert_eq!(group.match_exact("发".as_bytes()).unwrap().default_value(), "發");
    }

    #[test]
    fn ocd2_file_present_is_read_as_text() {
        let dir = tempdir().unwrap();
        write(dir.path(), "phrases.ocd2", "头发\t頭髮\n");
        write(dir.path(), "phrases.txt", "头发\t头发(txt)\n");
        let mut loader = DictionaryLoader::new(vec![dir.path().to_path_buf()]);
        let config = DictConfig {
            kind: DictType::Ocd2,
            file: Some("phrases.ocd2".into()),
            dicts: Vec::new(),
        };
        let dict = loader.load(&config).unwrap();
        assert_eq!(dict.match_exact("头发".as_bytes()).unwrap().default_value(), "頭髮");
    }

    #[test]
    fn embedded_dictionaries_fill_in_missing_files() {
        let dir = tempdir().unwrap();
        write(dir.path(), "STCharacters.txt", "发\t發\n");

        let mut disk_only = DictionaryLoader::new(vec![dir.path().to_path_buf()]);
        assert!(matches!(
            disk_only.load_text("STPhrases.txt"),
            Err(LoadError::DictionaryNotFound { .. })
        ));

        let mut loader = DictionaryLoader::new(vec![dir.path().to_path_buf()]).embedded(true);
        // 磁盘上的文件优先
        let chars = loader.load_text("STCharacters.txt").unwrap();
        assert_eq!(chars.len(), 1);
        assert_eq!(chars.match_exact("发".as_bytes()).unwrap().default_value(), "發");

        let phrases = loader.load_text("STPhrases.ocd2").unwrap();
        assert_eq!(
            phrases.match_exact("汉字".as_bytes()).unwrap().default_value(),
            "漢字"
        );
        let again = loader.load_text("STPhrases.txt").unwrap();
        assert!(Arc::ptr_eq(&phrases, &again));
        assert!(loader.load_text("Unknown.txt").is_err());
    }

    #[test]
    fn write_dictionary_round_trips_through_loader() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src.txt", "b\tB\na\tA1 A2\n");
        let mut loader = DictionaryLoader::new(vec![dir.path().to_path_buf()]);
        let dict = loader.load_text("src.txt").unwrap();

        let out = dir.path().join("out.txt");
        write_dictionary(&out, &*dict).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "a\tA1 A2\nb\tB\n");
    }
}
