use crate::conversion::ConversionChain;
use crate::segment::Segments;
use crate::segmenter::Segmenter;
use crate::utf8;

/// 转换器：负责把输入文本变成转换后的文本。
///
/// 流水线：segmenter（切分） -> conversion chain（逐步替换） -> 拼接输出
///
/// 除持有的两个只读组件外没有状态，多个线程可以同时调用 `convert`。
#[derive(Debug)]
pub struct Converter {
    /// 配置里的名字（例如 "Simplified Chinese to Traditional Chinese"）
    name: String,
    segmenter: Box<dyn Segmenter>,
    chain: ConversionChain,
}

impl Converter {
    pub fn new(
        name: impl Into<String>,
        segmenter: Box<dyn Segmenter>,
        chain: ConversionChain,
    ) -> Self {
        Self {
            name: name.into(),
            segmenter,
            chain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segmenter(&self) -> &dyn Segmenter {
        self.segmenter.as_ref()
    }

    pub fn conversion_chain(&self) -> &ConversionChain {
        &self.chain
    }

    /// 切分并逐步转换，但不拼接（便于调试和展示切分结果）。
    pub fn convert_segments(&self, text: &[u8]) -> Segments<'_> {
        self.chain.convert(self.segmenter.segment(text))
    }

    /// 转换任意字节串；非法 UTF-8 原样保留。
    pub fn convert_bytes(&self, text: &[u8]) -> Vec<u8> {
        if text.is_empty() {
            return Vec::new();
        }
        self.convert_segments(text).to_bytes()
    }

    /// 转换一段文本。
    pub fn convert(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        // 输入合法时每一段也都是合法 UTF-8，这里不会出现替换字符
        self.convert_segments(text.as_bytes()).to_string_lossy()
    }

    /// 转换后写入 `buffer`，放不下时在字符边界处截断；返回写入的字节数。
    pub fn convert_to_buffer(&self, text: &str, buffer: &mut [u8]) -> usize {
        let converted = self.convert(text);
        let fitted = utf8::truncate(&converted, buffer.len());
        buffer[..fitted.len()].copy_from_slice(fitted.as_bytes());
        fitted.len()
    }
}
