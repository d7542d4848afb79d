//! `dict_group`：按固定优先级组合多个词典。

use std::borrow::Cow;
use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::entry::Entry;
use crate::lexicon::Lexicon;

/// 词典组：列表顺序即优先级，靠前的词典遮蔽靠后词典里的同名 key。
///
/// 成员通过 `Arc` 共享，不做拷贝。
#[derive(Debug, Clone)]
pub struct DictGroup {
    dicts: Vec<Arc<dyn Dictionary>>,
}

impl DictGroup {
    pub fn new(dicts: Vec<Arc<dyn Dictionary>>) -> Self {
        Self { dicts }
    }

    pub fn len(&self) -> usize {
        self.dicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dicts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<dyn Dictionary>> {
        self.dicts.get(index)
    }

    pub fn dicts(&self) -> &[Arc<dyn Dictionary>] {
        &self.dicts
    }
}

impl Dictionary for DictGroup {
    fn match_exact(&self, word: &[u8]) -> Option<&Entry> {
        self.dicts.iter().find_map(|d| d.match_exact(word))
    }

    /// 各成员各自的最长前缀里取 key 最长者；等长时先遍历到的成员胜出。
    fn match_prefix(&self, word: &[u8]) -> Option<&Entry> {
        let mut best: Option<&Entry> = None;
        for d in &self.dicts {
            if let Some(entry) = d.match_prefix(word) {
                if best.is_none_or(|b| entry.key_len() > b.key_len()) {
                    best = Some(entry);
                }
            }
        }
        best
    }

    /// 合并所有成员的结果，按 (key 长度降序, key 升序) 排序，
    /// 同名 key 只保留优先级最高的那一条。
    fn match_all_prefixes(&self, word: &[u8]) -> Vec<&Entry> {
        let mut all: Vec<&Entry> = self
            .dicts
            .iter()
            .flat_map(|d| d.match_all_prefixes(word))
            .collect();
        // 稳定排序：同名 key 保持成员顺序，dedup 留下的就是靠前成员的词条
        all.sort_by(|a, b| b.key_len().cmp(&a.key_len()).then_with(|| a.cmp(b)));
        all.dedup_by(|a, b| a.key() == b.key());
        all
    }

    fn max_key_length(&self) -> usize {
        self.dicts.iter().map(|d| d.max_key_length()).max().unwrap_or(0)
    }

    fn lexicon(&self) -> Cow<'_, Lexicon> {
        let mut lexicon: Lexicon = self
            .dicts
            .iter()
            .flat_map(|d| d.lexicon().iter().cloned().collect::<Vec<_>>())
            .collect();
        lexicon.sort();
        Cow::Owned(lexicon)
    }
}
