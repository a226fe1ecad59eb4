use super::*;

fn lines(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("L{i} ")).collect()
}

#[test]
fn bottom_anchor_stacks_upward_from_start() {
    let block = LineBlock::new(lines(3), 580.0, 48.0, Anchor::Bottom);
    assert_eq!(block.line_ys(), vec![484.0, 532.0, 580.0]);
}

#[test]
fn bottom_anchor_single_line_sits_on_start() {
    let block = LineBlock::new(lines(1), 580.0, 48.0, Anchor::Bottom);
    assert_eq!(block.line_ys(), vec![580.0]);
}

#[test]
fn top_anchor_stacks_downward_from_start() {
    let block = LineBlock::new(lines(2), 20.0, 48.0, Anchor::Top);
    assert_eq!(block.line_ys(), vec![20.0, 68.0]);
}

#[test]
fn bottom_anchor_general_formula() {
    let (n, l, y) = (5usize, 36.0f32, 700.0f32);
    let block = LineBlock::new(lines(n), y, l, Anchor::Bottom);
    for i in 0..n {
        let expected = y - (n - 1 - i) as f32 * l;
        assert_eq!(block.line_y(i), expected);
    }
    assert_eq!(block.line_y(n - 1), y);
}

#[test]
fn positioned_pairs_text_with_y() {
    let block = LineBlock::new(lines(2), 20.0, 48.0, Anchor::Top);
    let got: Vec<(&str, f32)> = block.positioned().collect();
    assert_eq!(got, vec![("L0 ", 20.0), ("L1 ", 68.0)]);
}
