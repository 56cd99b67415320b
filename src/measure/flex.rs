//! # Flex Row Sizing
//!
//! The distribution arithmetic behind measured flex rows: splitting items
//! into wrap lines, then growing or shrinking each line to the container.
//! Widths here are margin-box widths.

/// Distribute remaining space among items based on flex-grow factors.
pub fn distribute_grow(items: &mut [(f64, f64)], remaining: f64) {
    // items: [(current_width, flex_grow)]
    let total_grow: f64 = items.iter().map(|(_, g)| g).sum();
    if total_grow <= 0.0 || remaining <= 0.0 {
        return;
    }
    for (width, grow) in items.iter_mut() {
        *width += remaining * (*grow / total_grow);
    }
}

/// Shrink items in proportion to their width until `overflow` is absorbed.
///
/// Each item is `(current_width, floor)`. No item shrinks below its floor,
/// so the line may still overflow when every item is at its floor.
pub fn distribute_shrink(items: &mut [(f64, f64)], overflow: f64) {
    if overflow <= 0.0 {
        return;
    }
    let mut left = overflow;
    // An item that hits its floor frees its share for the others.
    for _ in 0..items.len() {
        let weight: f64 = items
            .iter()
            .filter(|(w, floor)| w > floor)
            .map(|(w, _)| w)
            .sum();
        if weight <= 0.0 || left <= 0.0 {
            return;
        }
        let mut absorbed = 0.0;
        for (width, floor) in items.iter_mut() {
            if *width <= *floor {
                continue;
            }
            let target = (*width - left * (*width / weight)).max(*floor);
            absorbed += *width - target;
            *width = target;
        }
        left -= absorbed;
        if absorbed <= f64::EPSILON {
            return;
        }
    }
}

/// A single line of items in a wrapping flex row.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapLine {
    /// Index of the first item in this line.
    pub start: usize,
    /// One past the last item.
    pub end: usize,
}

impl WrapLine {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Partition items into wrap lines based on available width.
/// Every line holds at least one item, so an oversized item gets a line of its own.
pub fn partition_into_lines(
    base_widths: &[f64],
    column_gap: f64,
    available_width: f64,
) -> Vec<WrapLine> {
    if base_widths.is_empty() {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut line_width = 0.0;

    for (i, &w) in base_widths.iter().enumerate() {
        let needed = if i == line_start { w } else { column_gap + w };
        if i > line_start && line_width + needed > available_width {
            lines.push(WrapLine {
                start: line_start,
                end: i,
            });
            line_start = i;
            line_width = w;
        } else {
            line_width += needed;
        }
    }

    lines.push(WrapLine {
        start: line_start,
        end: base_widths.len(),
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_distribution() {
        let mut items = vec![(100.0, 1.0), (100.0, 2.0)];
        distribute_grow(&mut items, 90.0);
        assert!((items[0].0 - 130.0).abs() < 0.01);
        assert!((items[1].0 - 160.0).abs() < 0.01);
    }

    #[test]
    fn test_grow_ignores_negative_space() {
        let mut items = vec![(100.0, 1.0)];
        distribute_grow(&mut items, -20.0);
        assert_eq!(items[0].0, 100.0);
    }

    #[test]
    fn test_shrink_is_proportional() {
        let mut items = vec![(200.0, 0.0), (100.0, 0.0)];
        distribute_shrink(&mut items, 60.0);
        assert!((items[0].0 - 160.0).abs() < 0.01);
        assert!((items[1].0 - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_shrink_respects_floor() {
        // The narrow item bottoms out at 90; the wide one takes the rest.
        let mut items = vec![(200.0, 0.0), (100.0, 90.0)];
        distribute_shrink(&mut items, 60.0);
        assert!((items[1].0 - 90.0).abs() < 0.01);
        assert!((items[0].0 + items[1].0 - 240.0).abs() < 0.01);
    }

    #[test]
    fn test_shrink_stops_when_all_at_floor() {
        let mut items = vec![(100.0, 100.0), (50.0, 50.0)];
        distribute_shrink(&mut items, 30.0);
        assert_eq!(items, vec![(100.0, 100.0), (50.0, 50.0)]);
    }

    #[test]
    fn test_partition_single_line_fits() {
        let lines = partition_into_lines(&[100.0, 100.0, 100.0], 10.0, 400.0);
        assert_eq!(lines, vec![WrapLine { start: 0, end: 3 }]);
    }

    #[test]
    fn test_partition_two_line_split() {
        // 100 + 10 + 100 = 210 fits in 250; the third item wraps.
        let lines = partition_into_lines(&[100.0, 100.0, 100.0], 10.0, 250.0);
        assert_eq!(
            lines,
            vec![WrapLine { start: 0, end: 2 }, WrapLine { start: 2, end: 3 }]
        );
    }

    #[test]
    fn test_partition_oversized_item() {
        let lines = partition_into_lines(&[500.0], 10.0, 200.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 1);
    }

    #[test]
    fn test_partition_empty_input() {
        assert!(partition_into_lines(&[], 10.0, 200.0).is_empty());
    }

    #[test]
    fn test_partition_exact_fit() {
        let lines = partition_into_lines(&[100.0, 100.0], 10.0, 210.0);
        assert_eq!(lines.len(), 1);
    }
}
