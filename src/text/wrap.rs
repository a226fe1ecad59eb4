use crate::text::measure::TextMeasure;

/// Greedy line breaking of `text` against `max_width`.
///
/// Words are split on single spaces and every committed line keeps the trailing space it
/// was measured with. A word wider than `max_width` is never split: it gets a line of its
/// own and overflows. Runs of spaces yield empty words, so they are not collapsed.
///
/// Always returns at least one line; empty input yields a single blank line.
pub fn wrap_text<M>(text: &str, measure: &mut M, max_width: f32) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for (i, word) in text.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if i > 0 && measure.measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line.push(' ');
        } else {
            line = candidate;
        }
    }
    lines.push(line);

    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
