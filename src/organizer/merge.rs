use super::filter::LineToken;

/// Group tokens into lines by vertical proximity.
///
/// Tokens are stably sorted by `y`, so words on the same row keep the order
/// the OCR engine reported them in. A new line starts when the step from the
/// previous token exceeds `gap_px` (strictly). The gap is fixed and does not
/// adapt to font size.
pub fn merge_lines(mut tokens: Vec<LineToken>, gap_px: i32) -> Vec<String> {
    tokens.sort_by_key(|token| token.y);

    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut prev_y: Option<i32> = None;

    for token in tokens {
        match prev_y {
            Some(y) if token.y - y <= gap_px => current.push(token.text),
            _ => {
                if !current.is_empty() {
                    lines.push(current.join(" "));
                }
                current = vec![token.text];
            }
        }
        prev_y = Some(token.y);
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}
