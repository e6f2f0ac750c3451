//! Trend sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different bar heights (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline showing monthly job counts over time
///
/// Values are normalized against the maximum of the series, with a zero
/// baseline, so the shape of the trend is visible regardless of scale.
pub struct TrendSparkline<'a> {
    /// Job counts for each month, oldest first
    values: &'a [u64],
    /// Style for the bars
    style: Style,
    /// Style for the latest month's bar
    latest_style: Style,
}

impl<'a> TrendSparkline<'a> {
    pub fn new(values: &'a [u64]) -> Self {
        Self {
            values,
            style: Style::default().fg(Color::Cyan),
            latest_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn value_to_block(&self, value: u64) -> char {
        let max = self.values.iter().copied().max().unwrap_or(0).max(1);
        let normalized = (value as f64 / max as f64).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TrendSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let last = self.values.len().saturating_sub(1);

        for (i, value) in self.values.iter().take(width).enumerate() {
            let block = self.value_to_block(*value);
            let x = area.x + i as u16;
            let y = area.y;

            let style = if i == last {
                self.latest_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_block_zero_is_minimum() {
        let values = [0, 100];
        let sparkline = TrendSparkline::new(&values);
        assert_eq!(sparkline.value_to_block(0), '▁');
    }

    #[test]
    fn test_value_to_block_max_is_full() {
        let values = [0, 100];
        let sparkline = TrendSparkline::new(&values);
        assert_eq!(sparkline.value_to_block(100), '█');
    }

    #[test]
    fn test_value_to_block_mid_is_in_range() {
        let values = [0, 100];
        let sparkline = TrendSparkline::new(&values);
        let block = sparkline.value_to_block(50);
        assert!(BLOCKS.contains(&block));
    }

    #[test]
    fn test_all_zero_series_does_not_divide_by_zero() {
        let values = [0, 0, 0, 0, 0, 0];
        let sparkline = TrendSparkline::new(&values);
        assert_eq!(sparkline.value_to_block(0), '▁');
    }

    #[test]
    fn test_render_fills_one_cell_per_month() {
        let values = [10, 20, 30, 40, 50, 60];
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);

        TrendSparkline::new(&values).render(area, &mut buf);

        for x in 0..6u16 {
            let symbol = buf.cell((x, 0)).unwrap().symbol();
            assert!(
                BLOCKS.iter().any(|b| b.to_string() == symbol),
                "Cell {} should hold a block character, got {:?}",
                x,
                symbol
            );
        }
    }

    #[test]
    fn test_render_empty_area_is_a_noop() {
        let values = [10, 20];
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        TrendSparkline::new(&values).render(area, &mut buf);
    }
}
