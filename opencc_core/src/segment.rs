//! `segment`：切分结果。
//!
//! 一个 segment 要么是自有拷贝（未命中词典时的单个码点或单个字节），
//! 要么借用命中词条的 key；借用的生命周期 `'d` 由编译器保证不超过词典本身。

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'d> {
    /// 自有拷贝（可能不是合法 UTF-8）
    Owned(Vec<u8>),
    /// 指向词典中命中的 key
    Reference(&'d str),
}

impl Segment<'_> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Segment::Owned(bytes) => bytes,
            Segment::Reference(s) => s.as_bytes(),
        }
    }

    /// 合法 UTF-8 时返回字符串视图。
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Segment::Owned(bytes) => std::str::from_utf8(bytes).ok(),
            Segment::Reference(s) => Some(s),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Segment::Reference(_))
    }
}

/// 有序的 segment 序列。
///
/// 不变量：按顺序拼接全部 segment，恰好还原被切分的那段输入。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments<'d> {
    items: Vec<Segment<'d>>,
}

impl<'d> Segments<'d> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push_owned(&mut self, bytes: impl Into<Vec<u8>>) {
        self.items.push(Segment::Owned(bytes.into()));
    }

    pub fn push_reference(&mut self, key: &'d str) {
        self.items.push(Segment::Reference(key));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.items.get(index).map(Segment::as_bytes)
    }

    pub fn segments(&self) -> &[Segment<'d>] {
        &self.items
    }

    /// 按顺序遍历每个 segment 的字节。
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.items.iter().map(Segment::as_bytes)
    }

    /// 拼接全部 segment。
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.iter().map(<[u8]>::len).sum();
        let mut out = Vec::with_capacity(total);
        for bytes in self.iter() {
            out.extend_from_slice(bytes);
        }
        out
    }

    /// 拼接后按 UTF-8 解释；非法字节以 U+FFFD 替换。
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

impl From<Vec<String>> for Segments<'static> {
    fn from(strings: Vec<String>) -> Self {
        strings.into_iter().collect()
    }
}

impl FromIterator<String> for Segments<'static> {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|s| Segment::Owned(s.into_bytes()))
                .collect(),
        }
    }
}
