//! `utf8`：按字节处理 UTF-8 边界。
//!
//! 切分器面对的是任意字节串（可能含非法序列），这里的函数都不会 panic，
//! 也不会跨越非法字节去“猜”字符边界。

/// 返回 `bytes[pos..]` 开头那个合法码点的字节长度。
///
/// - 首字节非法、后续字节不是续字节、序列被截断、过长编码或代理区码点都返回 `None`
/// - `pos` 越界返回 `None`
///
/// 调用方在 `None` 时应只消费一个字节。
pub fn next_char_len(bytes: &[u8], pos: usize) -> Option<usize> {
    let lead = *bytes.get(pos)?;
    let len = match lead {
        0x00..=0x7F => return Some(1),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return None,
    };
    let end = pos.checked_add(len)?;
    let candidate = bytes.get(pos..end)?;
    std::str::from_utf8(candidate).ok().map(|_| len)
}

/// 码点个数；每个非法字节计为一个。
pub fn char_count(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        pos += next_char_len(bytes, pos).unwrap_or(1);
        count += 1;
    }
    count
}

/// 截取不超过 `max_bytes` 字节、且落在字符边界上的最长前缀。
pub fn truncate(s: &str, max_bytes: usize) -> &str {
    if max_bytes >= s.len() {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// 换行符或 NUL。
pub fn is_line_ending(b: u8) -> bool {
    b == b'\n' || b == b'\r' || b == 0
}

/// 在同一行内查找 `needle`（ASCII）第一次出现的位置，遇到行尾即停止。
pub fn find_next_inline(bytes: &[u8], needle: u8) -> Option<usize> {
    bytes
        .iter()
        .take_while(|&&b| !is_line_ending(b))
        .position(|&b| b == needle)
}
