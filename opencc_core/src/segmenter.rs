//! `segmenter`：把输入切分为 segment 序列。
//!
//! - `MaxMatchSegmenter`：正向最大匹配，命中词典的片段借用词典 key
//! - `CharacterSegmenter`：不看词典，逐码点切分
//!
//! 两者都接受任意字节串：非法 UTF-8 每次只消费一个字节，
//! 保证一定终止，且拼接结果与输入逐字节相同。

use std::fmt;
use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::segment::Segments;
use crate::utf8;

/// Segmenter：输入 -> segment 序列。
///
/// 返回的 `Segments<'s>` 可能借用切分器持有的词典，因此与 `&self` 同生命周期；
/// 输入本身只在调用期间被读取。
pub trait Segmenter: Send + Sync + fmt::Debug {
    fn segment<'s>(&'s self, text: &[u8]) -> Segments<'s>;
}

/// 贪心正向最大匹配，不回溯：给定词典，任一文本的切分结果唯一。
#[derive(Debug, Clone)]
pub struct MaxMatchSegmenter {
    dict: Arc<dyn Dictionary>,
}

impl MaxMatchSegmenter {
    pub fn new(dict: Arc<dyn Dictionary>) -> Self {
        Self { dict }
    }

    pub fn dict(&self) -> &Arc<dyn Dictionary> {
        &self.dict
    }
}

impl Segmenter for MaxMatchSegmenter {
    fn segment<'s>(&'s self, text: &[u8]) -> Segments<'s> {
        let mut segments = Segments::new();
        let max_key_length = self.dict.max_key_length();
        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            // 从最长候选长度往短试，第一个精确命中即为最长匹配
            let hit = (1..=rest.len().min(max_key_length))
                .rev()
                .find_map(|len| self.dict.match_exact(&rest[..len]));
            match hit {
                Some(entry) => {
                    segments.push_reference(entry.key());
                    pos += entry.key_len();
                }
                None => {
                    let len = utf8::next_char_len(text, pos).unwrap_or(1);
                    segments.push_owned(&rest[..len]);
                    pos += len;
                }
            }
        }
        segments
    }
}

/// 逐码点切分（非法字节单独成段）。
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterSegmenter;

impl Segmenter for CharacterSegmenter {
    fn segment<'s>(&'s self, text: &[u8]) -> Segments<'s> {
        let mut segments = Segments::new();
        let mut pos = 0;
        while pos < text.len() {
            let len = utf8::next_char_len(text, pos).unwrap_or(1);
            segments.push_owned(&text[pos..pos + len]);
            pos += len;
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::TextDictionary;
    use crate::entry::Entry;
    use proptest::prelude::*;

    fn segmenter(entries: Vec<Entry>) -> MaxMatchSegmenter {
        MaxMatchSegmenter::new(Arc::new(TextDictionary::from_entries(entries)))
    }

    fn parts(segments: &Segments<'_>) -> Vec<String> {
        segments
            .iter()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect()
    }

    #[test]
    fn matches_phrases_and_falls_back_to_characters() {
        let seg = segmenter(vec![Entry::with_value("简体", "簡體")]);
        let segments = seg.segment("简体中文".as_bytes());
        assert_eq!(parts(&segments), ["简体", "中", "文"]);
        assert!(segments.segments()[0].is_reference());
        assert!(!segments.segments()[1].is_reference());
    }

    #[test]
    fn prefers_longest_key() {
        let seg = segmenter(vec![
            Entry::with_value("简体", "簡體"),
            Entry::with_value("汉字", "漢字"),
            Entry::with_value("简", "簡"),
        ]);
        assert_eq!(parts(&seg.segment("简体汉字".as_bytes())), ["简体", "汉字"]);
        assert_eq!(parts(&seg.segment("简汉".as_bytes())), ["简", "汉"]);
    }

    #[test]
    fn greedy_without_backtracking() {
        // "ab" 抢先命中后，"bc" 不会再被考虑
        let seg = segmenter(vec![Entry::new("ab"), Entry::new("bc")]);
        assert_eq!(parts(&seg.segment(b"abc")), ["ab", "c"]);
    }

    #[test]
    fn unmatched_phrase_splits_per_character() {
        let seg = segmenter(vec![Entry::with_values("发", vec!["髪".into(), "發".into()])]);
        assert_eq!(parts(&seg.segment("头发".as_bytes())), ["头", "发"]);
    }

    #[test]
    fn invalid_utf8_consumes_single_bytes() {
        let seg = segmenter(vec![Entry::new("a")]);
        let input = [b'a', 0xE6, 0xB1, b'a', 0xFF];
        let segments = seg.segment(&input);
        assert_eq!(segments.len(), 5);
        assert_eq!(segments.to_bytes(), input);
    }

    #[test]
    fn empty_input_and_empty_dictionary() {
        let seg = segmenter(Vec::new());
        assert!(seg.segment(b"").is_empty());
        assert_eq!(parts(&seg.segment("汉字".as_bytes())), ["汉", "字"]);
    }

    #[test]
    fn character_segmenter_splits_code_points() {
        let segments = CharacterSegmenter.segment("a汉😀".as_bytes());
        assert_eq!(parts(&segments), ["a", "汉", "😀"]);
        let segments = CharacterSegmenter.segment(&[0xF0, 0x9F, b'x']);
        assert_eq!(segments.len(), 3);
    }

    proptest! {
        #[test]
        fn max_match_covers_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..=200)) {
            let seg = segmenter(vec![
                Entry::new("ab"),
                Entry::new("汉字"),
                Entry::new("\u{FFFD}"),
                Entry::new("b"),
            ]);
            prop_assert_eq!(seg.segment(&bytes).to_bytes(), bytes);
        }

        #[test]
        fn max_match_covers_text(text in "[ab汉字简体 ]{0,40}") {
            let seg = segmenter(vec![Entry::new("ab"), Entry::new("汉字"), Entry::new("简体")]);
            prop_assert_eq!(seg.segment(text.as_bytes()).to_bytes(), text.as_bytes());
        }

        #[test]
        fn character_segmenter_covers_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..=200)) {
            prop_assert_eq!(CharacterSegmenter.segment(&bytes).to_bytes(), bytes);
        }
    }
}
