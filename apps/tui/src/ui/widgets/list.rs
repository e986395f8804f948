/// First row to draw so that `selected_index` stays inside a window of
/// `max_visible_rows`.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || selected_index < max_visible_rows {
        return 0;
    }

    selected_index + 1 - max_visible_rows
}

/// Offset that keeps the last `visible` of `total` lines on screen.
pub const fn tail_offset(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_inside_first_window_does_not_scroll() {
        assert_eq!(scroll_offset(20, 5, 4), 0);
        assert_eq!(scroll_offset(3, 5, 2), 0);
    }

    #[test]
    fn selection_past_window_keeps_it_on_last_row() {
        assert_eq!(scroll_offset(20, 5, 5), 1);
        assert_eq!(scroll_offset(20, 5, 19), 15);
    }

    #[test]
    fn tail_offset_saturates() {
        assert_eq!(tail_offset(3, 10), 0);
        assert_eq!(tail_offset(12, 10), 2);
    }
}
