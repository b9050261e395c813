//! Plain-text heatmap rendering
//!
//! Renders `HeatmapData` as an aligned grid: one line per row label, one
//! column per weekday. Record rows print whole counts, the average row
//! prints `precision` decimals.

use crate::types::{GridCell, HeatmapData, Weekday, WeekdayStatistics};

/// Text renderer for terminals
pub struct TableRenderer {
    precision: usize,
    show_aggregates: bool,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TableRenderer {
    pub fn new(precision: usize) -> Self {
        Self {
            precision,
            show_aggregates: true,
        }
    }

    pub fn with_aggregates(mut self, show_aggregates: bool) -> Self {
        self.show_aggregates = show_aggregates;
        self
    }

    pub fn render(&self, data: &HeatmapData) -> String {
        let columns = data.column_labels.len();
        let labels = if self.show_aggregates {
            data.row_labels()
        } else {
            data.record_labels()
        };
        let row_count = labels.len();

        let mut grid = vec![vec![String::new(); columns]; row_count];
        self.place(&mut grid, &data.record_cells, 0);
        if self.show_aggregates {
            self.place(&mut grid, &data.aggregate_cells, self.precision);
        }

        let label_width = labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0);
        let cell_width = data
            .column_labels
            .iter()
            .map(|label| label.chars().count())
            .chain(grid.iter().flatten().map(|cell| cell.chars().count()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        out.push_str(&format!("{:<label_width$}", ""));
        for label in &data.column_labels {
            out.push_str(&format!("  {:>cell_width$}", label));
        }
        out.push('\n');

        for (row, cells) in grid.iter().enumerate() {
            if row == data.record_count() {
                let rule_width = label_width + columns * (cell_width + 2);
                out.push_str(&"-".repeat(rule_width));
                out.push('\n');
            }
            out.push_str(&format!("{:<label_width$}", labels[row]));
            for cell in cells {
                out.push_str(&format!("  {:>cell_width$}", cell));
            }
            out.push('\n');
        }

        out
    }

    /// Per-weekday totals and averages, one line per weekday
    pub fn render_statistics(&self, stats: &WeekdayStatistics) -> String {
        let mut out = format!("Weekday Statistics ({} records)\n", stats.record_count);
        out.push_str("==============================\n");
        out.push_str(&format!("{:<10} {:>10} {:>10}\n", "Weekday", "Total", "Average"));
        for day in Weekday::ALL {
            out.push_str(&format!(
                "{:<10} {:>10} {:>10.*}\n",
                day.label(),
                stats.sums.get(day),
                self.precision,
                stats.averages.get(day)
            ));
        }
        out
    }

    fn place(&self, grid: &mut [Vec<String>], cells: &[GridCell], precision: usize) {
        for cell in cells {
            if let Some(slot) = grid
                .get_mut(cell.row)
                .and_then(|row| row.get_mut(cell.column))
            {
                *slot = format_value(cell.value, precision);
            }
        }
    }
}

fn format_value(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.*}", precision, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::build_heatmap;
    use crate::store::seed_records;
    use crate::types::{WeekdayRecord, WeekdayValues};

    fn seed_data() -> HeatmapData {
        build_heatmap(&seed_records().unwrap()).unwrap()
    }

    #[test]
    fn test_render_has_header_rows_and_rule() {
        let text = TableRenderer::default().render(&seed_data());
        let lines: Vec<&str> = text.lines().collect();

        // header + 10 records + rule + 2 aggregates
        assert_eq!(lines.len(), 14);
        assert!(lines[0].contains("Monday"));
        assert!(lines[0].contains("Friday"));
        assert!(lines[1].starts_with("Alexander"));
        assert!(lines[11].starts_with('-'));
        assert!(lines[12].starts_with("Average"));
        assert!(lines[13].starts_with("Total"));
    }

    #[test]
    fn test_render_values() {
        let text = TableRenderer::default().render(&seed_data());
        let average = text.lines().find(|l| l.starts_with("Average")).unwrap();
        let total = text.lines().find(|l| l.starts_with("Total")).unwrap();

        assert!(average.contains("51.1"));
        assert!(average.contains("71.9"));
        assert!(total.contains("511"));
        assert!(total.contains("719"));
    }

    #[test]
    fn test_render_without_aggregates() {
        let text = TableRenderer::default()
            .with_aggregates(false)
            .render(&seed_data());

        assert_eq!(text.lines().count(), 11);
        assert!(!text.contains("Average"));
    }

    #[test]
    fn test_render_single_record_without_aggregates() {
        let record = WeekdayRecord::new("Solo", WeekdayValues::new(3, 0, 7, 1, 9)).unwrap();
        let data = build_heatmap(&[record]).unwrap();
        let text = TableRenderer::default().with_aggregates(false).render(&data);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Solo"));
    }

    #[test]
    fn test_statistics_follow_precision() {
        let stats = seed_data().statistics().clone();

        let default = TableRenderer::default().render_statistics(&stats);
        let monday = default.lines().find(|l| l.starts_with("Monday")).unwrap();
        assert!(monday.ends_with(" 51.1"));
        assert!(monday.contains("511"));

        let precise = TableRenderer::new(3).render_statistics(&stats);
        let friday = precise.lines().find(|l| l.starts_with("Friday")).unwrap();
        assert!(friday.ends_with(" 71.900"));
    }

    #[test]
    fn test_whole_averages_print_without_decimals() {
        assert_eq!(format_value(66.0, 2), "66");
        assert_eq!(format_value(58.9, 2), "58.90");
    }
}
