use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// How a text node breaks lines that are wider than the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWrap {
    /// Lines are never broken; overflow is clipped.
    None,
    /// Break at any character.
    #[default]
    Char,
    /// Break between words, falling back to characters for long words.
    Word,
}

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Break `text` into display lines at most `max_width` columns wide.
///
/// Every logical line (split on `\n`) produces at least one display line,
/// so the empty string is one line and `"a\n"` is two.
pub fn wrap(text: &str, max_width: usize, mode: TextWrap) -> Vec<String> {
    match mode {
        TextWrap::None => text.split('\n').map(str::to_string).collect(),
        TextWrap::Char => text
            .split('\n')
            .flat_map(|line| wrap_line_chars(line, max_width))
            .collect(),
        TextWrap::Word => text
            .split('\n')
            .flat_map(|line| wrap_line_words(line, max_width))
            .collect(),
    }
}

/// Number of display lines `text` needs at `max_width` columns.
pub fn display_line_count(text: &str, max_width: usize, mode: TextWrap) -> usize {
    wrap(text, max_width, mode).len()
}

fn wrap_line_chars(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || line.is_empty() {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;

    for ch in line.chars() {
        let w = char_width(ch);
        if w > 0 && width + w > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            width = 0;
        }
        current.push(ch);
        width += w;
    }

    lines.push(current);
    lines
}

fn wrap_line_words(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || display_width(line) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;

    for word in line.split_whitespace() {
        let word_width = display_width(word);

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = wrap_line_chars(word, max_width);
            // The tail of a broken word keeps collecting following words.
            current = pieces.pop().unwrap_or_default();
            width = display_width(&current);
            lines.extend(pieces);
            continue;
        }

        let gap = usize::from(!current.is_empty());
        if width + gap + word_width > max_width {
            lines.push(std::mem::take(&mut current));
            width = 0;
        } else if gap == 1 {
            current.push(' ');
            width += 1;
        }
        current.push_str(word);
        width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
