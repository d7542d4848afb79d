//! `entry`：词条（一个 key 对应零个、一个或多个候选值）。

use std::cmp::Ordering;
use std::fmt;

/// 词条的候选值，按声明顺序保存。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Values {
    /// 只有 key，没有值（转换时原样输出 key）
    Empty,
    Single(String),
    /// 两个及以上的候选值，第一个为默认值
    Many(Vec<String>),
}

impl Values {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Values::Empty => &[],
            Values::Single(v) => std::slice::from_ref(v),
            Values::Many(vs) => vs,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Values::Empty => 0,
            Values::Single(_) => 1,
            Values::Many(vs) => vs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 词典词条。
///
/// 约定：
/// - 相等与排序只看 `key`（按字节序），`values` 不参与比较
/// - 构造后不可变
#[derive(Debug, Clone)]
pub struct Entry {
    key: String,
    values: Values,
}

impl Entry {
    /// 无值词条。
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Values::Empty,
        }
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Values::Single(value.into()),
        }
    }

    /// 按值的个数自动选择最小表示（零 / 单值 / 多值）。
    pub fn with_values(key: impl Into<String>, mut values: Vec<String>) -> Self {
        let values = match values.len() {
            0 => Values::Empty,
            1 => Values::Single(values.remove(0)),
            _ => Values::Many(values),
        };
        Self {
            key: key.into(),
            values,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// key 的字节长度。
    pub fn key_len(&self) -> usize {
        self.key.len()
    }

    pub fn values(&self) -> &[String] {
        self.values.as_slice()
    }

    pub fn raw_values(&self) -> &Values {
        &self.values
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    /// 默认值：第一个声明的值；无值时返回 key 本身。
    pub fn default_value(&self) -> &str {
        match &self.values {
            Values::Empty => &self.key,
            Values::Single(v) => v,
            Values::Many(vs) => vs.first().map_or(&self.key, |v| v),
        }
    }

    /// 解析词库的一行。
    ///
    /// 格式：`key<TAB>value1 value2 ...`
    /// - 行尾的 `\r` / `\n` 先去掉
    /// - 空行与 `#` 开头的行返回 `None`
    /// - 没有 TAB 时得到无值词条；TAB 之后按空白切出候选值
    ///
    /// 不做其它校验，格式不对的行退化为值更少的词条。
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let entry = match line.split_once('\t') {
            Some((key, rest)) => {
                Self::with_values(key, rest.split_whitespace().map(str::to_owned).collect())
            }
            None => Self::new(line),
        };
        Some(entry)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.as_bytes().cmp(other.key.as_bytes())
    }
}

/// 词库源格式：`key` 或 `key<TAB>v1 v2 ...`。
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        if !self.values.is_empty() {
            write!(f, "\t{}", self.values().join(" "))?;
        }
        Ok(())
    }
}
