use std::borrow::Cow;

// ツリー描画ツールはラベル中の空白を "_" で書き出すので元に戻す
pub fn normalize_label(label: &str) -> Cow<'_, str> {
    if label.contains('_') {
        Cow::Owned(label.replace('_', " "))
    } else {
        Cow::Borrowed(label)
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// "<svg:text ..." -> Some("svg")
pub fn qualified_name_prefix(start_tag: &str) -> Option<&str> {
    let name = start_tag
        .strip_prefix('<')?
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()?;
    name.split_once(':').map(|(prefix, _)| prefix)
}

// 開始タグ末尾の '>' の直後の位置 (属性値の中の '>' は数えない)
pub fn start_tag_end(element: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in element.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}
