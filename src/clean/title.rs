/// Split a combined "Title (pages)" field at the last parenthesis pair.
///
/// The pages part runs from after `(` to two characters before `)`, so
/// "(12 S.)" yields "12" while "(12)" yields "" and "(250)" yields "2".
/// A missing `(` or `)` counts as position -1 and negative bounds count from
/// the back: "Plain title" splits into "Plain titl" and "Plain ti".
pub fn split_title_pages(field: &str) -> (String, String) {
    let chars: Vec<char> = field.chars().collect();
    let len = chars.len() as isize;
    let position = |c: char| chars.iter().rposition(|&x| x == c).map_or(-1, |i| i as isize);
    let open = position('(');
    let close = position(')');

    let title_end = slice_bound(open, len);
    let title: String = chars[..title_end].iter().collect();

    let start = slice_bound(open + 1, len);
    let end = slice_bound(close - 2, len);
    let pages: String = if start < end {
        chars[start..end].iter().collect()
    } else {
        String::new()
    };

    (title.trim().to_string(), pages.trim().to_string())
}

/// Slice bound with wrap-around for negative values, clamped to `[0, len]`
fn slice_bound(index: isize, len: isize) -> usize {
    let index = if index < 0 { index + len } else { index };
    index.clamp(0, len) as usize
}

/// Number of whitespace-separated words
pub fn title_word_count(title: &str) -> usize {
    title.split_whitespace().count()
}
