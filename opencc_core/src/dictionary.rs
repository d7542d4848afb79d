//! `dictionary`：词典抽象与基于有序数组的实现。
//!
//! 查询参数一律是字节串：切分器面对的输入可能含非法 UTF-8，
//! 而 key 都是合法 UTF-8，非法前缀自然查不到。

use std::borrow::Cow;
use std::fmt;

use crate::entry::Entry;
use crate::lexicon::Lexicon;

/// 词典抽象：core 不关心词典来自文件还是内存。
///
/// 约定：
/// - 构建完成后只读，实现必须可以跨线程共享
/// - 长度一律按字节计
pub trait Dictionary: Send + Sync + fmt::Debug {
    /// 精确匹配。
    fn match_exact(&self, word: &[u8]) -> Option<&Entry>;

    /// 最长前缀匹配：返回是 `word` 前缀的最长 key。
    fn match_prefix(&self, word: &[u8]) -> Option<&Entry> {
        let max_len = word.len().min(self.max_key_length());
        (1..=max_len)
            .rev()
            .find_map(|len| self.match_exact(&word[..len]))
    }

    /// 所有是 `word` 前缀的 key，按长度升序。
    fn match_all_prefixes(&self, word: &[u8]) -> Vec<&Entry> {
        let max_len = word.len().min(self.max_key_length());
        (1..=max_len)
            .filter_map(|len| self.match_exact(&word[..len]))
            .collect()
    }

    /// 最长 key 的字节长度。
    fn max_key_length(&self) -> usize;

    /// 词典内的全部词条（已排序）。
    fn lexicon(&self) -> Cow<'_, Lexicon>;
}

/// 单一词典：有序词库 + 二分查找。
///
/// 前缀匹配对每个候选长度各做一次二分，而不是走 trie；
/// 代价是 O(max_key_length · log n)。
#[derive(Debug, Clone)]
pub struct TextDictionary {
    lexicon: Lexicon,
    max_key_length: usize,
}

impl TextDictionary {
    /// `lexicon` 必须已按 key 排序。
    pub fn new(lexicon: Lexicon) -> Self {
        debug_assert!(lexicon.is_sorted(), "lexicon must be sorted by key");
        let max_key_length = lexicon.iter().map(Entry::key_len).max().unwrap_or(0);
        tracing::debug!(entries = lexicon.len(), max_key_length, "text dictionary built");
        Self {
            lexicon,
            max_key_length,
        }
    }

    /// 先排序再构建。
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut lexicon: Lexicon = entries.into_iter().collect();
        lexicon.sort();
        Self::new(lexicon)
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }
}

impl Dictionary for TextDictionary {
    fn match_exact(&self, word: &[u8]) -> Option<&Entry> {
        let entries = self.lexicon.entries();
        // 有重复 key 时命中哪一个是不确定的
        entries
            .binary_search_by(|e| e.key().as_bytes().cmp(word))
            .ok()
            .map(|i| &entries[i])
    }

    fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    fn lexicon(&self) -> Cow<'_, Lexicon> {
        Cow::Borrowed(&self.lexicon)
    }
}
