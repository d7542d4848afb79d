//! `lexicon`：词条集合，加载期的产物。
//!
//! 交给 `TextDictionary` 之前必须按 key 排好序；重复 key 不会被拒绝，
//! 需要时由调用方显式调用 [`Lexicon::find_duplicate_key`]。

use std::io::{BufRead, Write};

use crate::entry::Entry;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<Entry>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// 按 key 升序稳定排序（字节序）。
    pub fn sort(&mut self) {
        self.entries.sort();
    }

    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0] <= w[1])
    }

    /// 在排序后的副本上查找第一个出现两次的 key；不改动自身顺序。
    pub fn find_duplicate_key(&self) -> Option<&str> {
        let mut keys: Vec<&str> = self.entries.iter().map(Entry::key).collect();
        keys.sort_unstable();
        keys.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
    }

    /// 从字符串解析（逐行，见 [`Entry::parse_line`]）。结果未排序。
    pub fn parse_str(s: &str) -> Self {
        s.lines().filter_map(Entry::parse_line).collect()
    }

    /// 从读取器逐行解析。
    ///
    /// 任何 I/O 错误或非法 UTF-8 都会中止整个加载，不返回半成品。
    pub fn from_reader(mut reader: impl BufRead) -> Result<Self> {
        let mut lexicon = Self::new();
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let line = std::str::from_utf8(&buf).map_err(|_| Error::InvalidUtf8 { line: line_no })?;
            if let Some(entry) = Entry::parse_line(line) {
                lexicon.add(entry);
            }
        }
        tracing::debug!(entries = lexicon.len(), lines = line_no, "lexicon parsed");
        Ok(lexicon)
    }

    /// 按词库源格式逐行写出。
    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        for entry in &self.entries {
            writeln!(writer, "{entry}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl FromIterator<Entry> for Lexicon {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
