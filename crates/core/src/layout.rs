//! Cosmetic layout arithmetic, kept out of the presentation code so it can be tested.

/// Placement of items in an equal-width grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub column_width: u32,
    /// Every row is as tall as the tallest item.
    pub row_height: u32,
    pub total_height: u32,
    /// Top-left corner of each item, in input order.
    pub positions: Vec<(u32, u32)>,
}

/// Lay out items row by row in `columns` equal-width columns.
///
/// `heights` are the items' natural heights. A `columns` of zero is treated as one.
pub fn equal_width_grid(columns: u32, spacing: u32, max_width: u32, heights: &[u32]) -> GridLayout {
    let columns = columns.max(1);
    let gaps = (columns - 1).saturating_mul(spacing);
    let column_width = max_width.saturating_sub(gaps) / columns;
    let row_height = heights.iter().copied().max().unwrap_or(0);

    let rows = (heights.len() as u32).div_ceil(columns);
    let total_height = rows
        .saturating_mul(row_height)
        .saturating_add(rows.saturating_sub(1).saturating_mul(spacing));

    let positions = (0..heights.len() as u32)
        .map(|i| {
            let (row, col) = (i / columns, i % columns);
            (
                col.saturating_mul(column_width.saturating_add(spacing)),
                row.saturating_mul(row_height.saturating_add(spacing)),
            )
        })
        .collect();

    GridLayout {
        column_width,
        row_height,
        total_height,
        positions,
    }
}

/// Fraction of the pregnancy completed, clamped to `[0, 1]`.
pub fn progress_fraction(week: u32, total_weeks: u32) -> f32 {
    if total_weeks == 0 {
        return 1.0;
    }
    (week as f32 / total_weeks as f32).clamp(0.0, 1.0)
}

/// Whole percent shown in the progress ring; fractions are truncated, not rounded.
pub fn progress_percent(week: u32, total_weeks: u32) -> u32 {
    (progress_fraction(week, total_weeks) * 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_places_items_row_by_row() {
        let grid = equal_width_grid(2, 10, 210, &[40, 60, 50]);
        assert_eq!(grid.column_width, 100);
        assert_eq!(grid.row_height, 60);
        assert_eq!(grid.total_height, 130);
        assert_eq!(grid.positions, vec![(0, 0), (110, 0), (0, 70)]);
    }

    #[test]
    fn test_grid_empty_has_no_height() {
        let grid = equal_width_grid(3, 8, 300, &[]);
        assert_eq!(grid.total_height, 0);
        assert!(grid.positions.is_empty());
    }

    #[test]
    fn test_grid_saturates_on_huge_heights() {
        let grid = equal_width_grid(1, 4, 100, &[u32::MAX, 1, 1]);
        assert_eq!(grid.row_height, u32::MAX);
        assert_eq!(grid.total_height, u32::MAX);
        assert_eq!(grid.positions[0], (0, 0));
        assert_eq!(grid.positions[2], (0, u32::MAX));
    }

    #[test]
    fn test_progress_clamped_and_truncated() {
        assert_eq!(progress_percent(20, 40), 50);
        assert_eq!(progress_percent(13, 40), 32);
        assert_eq!(progress_fraction(42, 40), 1.0);
        assert_eq!(progress_fraction(0, 40), 0.0);
    }
}
