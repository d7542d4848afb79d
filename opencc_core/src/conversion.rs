//! `conversion`：逐段替换。
//!
//! 转换链中的每一步只替换整段，不会重新切分、拆分或合并 segment；
//! segment 的个数在切分那一刻就固定了。

use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::segment::Segments;

/// 单步转换：用一个词典把每段替换为其默认值。
#[derive(Debug, Clone)]
pub struct Conversion {
    dict: Arc<dyn Dictionary>,
}

impl Conversion {
    pub fn new(dict: Arc<dyn Dictionary>) -> Self {
        Self { dict }
    }

    pub fn dict(&self) -> &Arc<dyn Dictionary> {
        &self.dict
    }

    /// 精确命中时返回词条默认值，否则原样返回输入。
    pub fn convert<'a>(&'a self, phrase: &'a [u8]) -> &'a [u8] {
        match self.dict.match_exact(phrase) {
            Some(entry) => entry.default_value().as_bytes(),
            None => phrase,
        }
    }

    pub fn convert_str<'a>(&'a self, phrase: &'a str) -> &'a str {
        match self.dict.match_exact(phrase.as_bytes()) {
            Some(entry) => entry.default_value(),
            None => phrase,
        }
    }

    /// 逐段转换，得到等长的新序列；结果全部是自有拷贝。
    pub fn convert_segments(&self, segments: &Segments<'_>) -> Segments<'static> {
        let mut out = Segments::with_capacity(segments.len());
        for phrase in segments.iter() {
            out.push_owned(self.convert(phrase));
        }
        out
    }
}

/// 转换链：第 i 步的输出就是第 i+1 步的输入。
#[derive(Debug, Clone, Default)]
pub struct ConversionChain {
    conversions: Vec<Conversion>,
}

impl ConversionChain {
    pub fn new(conversions: Vec<Conversion>) -> Self {
        Self { conversions }
    }

    pub fn conversions(&self) -> &[Conversion] {
        &self.conversions
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    pub fn convert<'a>(&self, segments: Segments<'a>) -> Segments<'a> {
        let mut current = segments;
        for conversion in &self.conversions {
            current = conversion.convert_segments(&current);
        }
        current
    }
}
