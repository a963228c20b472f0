//! Plain-text helpers shared by the catalog and the generator

/// Count words in content, tolerating embedded HTML. ASCII alphanumeric
/// runs count as one word each; CJK ideographs count one per character so
/// mixed-language posts get a sane reading-time estimate.
pub fn count_words(content: &str) -> usize {
    let text = strip_html(content);
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if ('\u{4E00}'..='\u{9FFF}').contains(&c) {
            count += 1;
            in_word = false;
        } else {
            in_word = false;
        }
    }

    count
}

/// Strip HTML tags, keeping text content.
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_english() {
        assert_eq!(count_words("hello world"), 2);
        assert_eq!(count_words("one, two... three!"), 3);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_count_words_ignores_markup() {
        assert_eq!(count_words("<p>hello <em>brave</em> world</p>"), 3);
    }

    #[test]
    fn test_count_words_cjk() {
        // Each ideograph is one word
        assert_eq!(count_words("你好世界"), 4);
        assert_eq!(count_words("rust 很好"), 3);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>text</p>"), "text");
        assert_eq!(strip_html("no tags"), "no tags");
        assert_eq!(strip_html("<a href=\"x\">link</a> tail"), "link tail");
    }
}
