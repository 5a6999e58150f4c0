#![forbid(unsafe_code)]

//! Renders a [`TimelineStore`] onto a [`TextSurface`].
//!
//! Layout mirrors the store's pixel geometry, rescaled onto the
//! surface width: the left inset becomes the task name column, the
//! chart area holds the bars, and the header row carries axis tick
//! labels. Bars clip to the chart area; a bar wholly outside the view
//! draws nothing.

use crate::surface::TextSurface;
use gantt_core::{TickUnit, ticks};
use gantt_store::TimelineStore;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Draws a timeline store as rows of colored bars.
///
/// Builder style, matching how a host configures it once and renders
/// per frame:
///
/// ```ignore
/// let surface = ChartRenderer::new()
///     .ascii(true)
///     .render(&store, 120);
/// println!("{}", surface.to_plain_lines().join("\n"));
/// ```
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    /// Explicit bar glyph, overriding the charset default.
    bar_glyph: Option<char>,
    /// Draw grid columns under major ticks.
    show_grid: bool,
    /// Restrict output to ASCII glyphs.
    ascii: bool,
    /// Row index to mark with a selection pointer.
    selected: Option<usize>,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self {
            bar_glyph: None,
            show_grid: true,
            ascii: false,
            selected: None,
        }
    }

    /// Override the glyph used for bar interiors.
    pub fn bar_glyph(mut self, glyph: char) -> Self {
        self.bar_glyph = Some(glyph);
        self
    }

    /// Toggle grid columns under major ticks. Defaults to on.
    pub fn show_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Use ASCII-only glyphs for bars, grid, and markers.
    pub fn ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    /// Mark a task row with a selection pointer.
    pub fn selected(mut self, row: Option<usize>) -> Self {
        self.selected = row;
        self
    }

    fn bar(&self) -> char {
        self.bar_glyph.unwrap_or(if self.ascii { '#' } else { '█' })
    }

    fn milestone(&self) -> char {
        if self.ascii { '*' } else { '◆' }
    }

    fn grid(&self) -> char {
        if self.ascii { '.' } else { '·' }
    }

    fn pointer(&self) -> char {
        if self.ascii { '>' } else { '▸' }
    }

    fn ellipsis(&self) -> &'static str {
        if self.ascii { "..." } else { "…" }
    }

    /// Render `store` onto a fresh surface `width` columns wide.
    ///
    /// The surface is one header row plus one row per task. Pixel
    /// coordinates scale by `width / container_width`, so any terminal
    /// width shows the whole layout.
    pub fn render(&self, store: &TimelineStore, width: usize) -> TextSurface {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "chart_render",
            width,
            tasks = store.tasks().len()
        )
        .entered();

        let mut surface = TextSurface::new(width, store.tasks().len() + 1);
        if width == 0 {
            return surface;
        }

        let layout = store.layout();
        let columns_per_pixel = width as f64 / layout.container_width;
        let to_col = |px: f64| px * columns_per_pixel;
        let chart_left = to_col(layout.chart_left());
        let chart_right = to_col(layout.chart_right());

        let scale = store.time_scale();
        let unit = TickUnit::for_pixels_per_day(scale.pixels_per_day());
        let axis = ticks(&scale, unit);

        // Validated insets keep the chart band at non-negative columns.
        let band_left = chart_left.round();
        let band_right = chart_right.round();

        // Grid first so bars draw over it.
        if self.show_grid {
            for tick in axis.iter().filter(|tick| tick.major) {
                let col = to_col(tick.position).round();
                if (band_left..=band_right).contains(&col) {
                    for row in 0..store.tasks().len() {
                        surface.put(col as usize, row + 1, self.grid(), None);
                    }
                }
            }
        }

        for (row, bar) in store.task_bars().iter().enumerate() {
            let y = row + 1;

            if bar.width == 0.0 {
                // Milestones have no pixel extent; show a marker instead.
                let col = to_col(bar.x).round();
                if (band_left..=band_right).contains(&col) {
                    surface.put(col as usize, y, self.milestone(), Some(bar.task.color));
                }
                continue;
            }

            let lo = to_col(bar.x).round().max(band_left);
            let hi = to_col(bar.x + bar.width).round().min(band_right);
            if hi > lo {
                surface.fill_row(y, lo as usize, hi as usize, self.bar(), Some(bar.task.color));
            }
        }

        // Name column sits in the left inset, one column of gutter on
        // each side for the selection pointer and the chart edge.
        let name_budget = (band_left as usize).saturating_sub(3);
        for (row, task) in store.tasks().iter().enumerate() {
            if self.selected == Some(row) {
                surface.put(0, row + 1, self.pointer(), None);
            }
            if name_budget > 0 {
                let name = truncate_name(&task.name, name_budget, self.ellipsis());
                surface.put_str(2, row + 1, &name, None);
            }
        }

        // Header labels, skipping any that would collide.
        let mut next_free = 0usize;
        for tick in &axis {
            let col = to_col(tick.position).round();
            if !(band_left..=band_right).contains(&col) {
                continue;
            }
            let col = col as usize;
            let label_width = tick.label.width();
            if col < next_free || col + label_width > width {
                continue;
            }
            surface.put_str(col, 0, &tick.label, None);
            next_free = col + label_width + 1;
        }

        surface
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate `name` to `max_width` display columns, appending
/// `ellipsis` when anything was cut.
fn truncate_name(name: &str, max_width: usize, ellipsis: &str) -> String {
    if name.width() <= max_width {
        return name.to_string();
    }
    let ellipsis_width = ellipsis.width();
    let budget = max_width.saturating_sub(ellipsis_width);
    let mut kept = String::new();
    let mut used = 0;
    for ch in name.chars() {
        let glyph_width = ch.width().unwrap_or(0);
        if used + glyph_width > budget {
            break;
        }
        kept.push(ch);
        used += glyph_width;
    }
    if ellipsis_width <= max_width {
        kept.push_str(ellipsis);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::{ChartRenderer, truncate_name};
    use chrono::{TimeZone, Utc};
    use gantt_core::{ChartLayout, Rgba, TimeRange};
    use gantt_store::{Task, TaskId, TimelineStore};

    fn demo_lines(width: usize) -> Vec<String> {
        ChartRenderer::new()
            .render(&TimelineStore::demo(), width)
            .to_plain_lines()
    }

    #[test]
    fn full_width_render_matches_pixel_geometry() {
        // At 1000 columns the pixel-to-column mapping is the identity.
        let lines = demo_lines(1000);
        assert_eq!(lines.len(), 4);

        // Task 1 spans Jan 1-10: columns 150..391.
        let row: Vec<char> = lines[1].chars().collect();
        assert_eq!(row.get(150), Some(&'█'));
        assert_eq!(row.get(390), Some(&'█'));
        assert_ne!(row.get(391), Some(&'█'));
        assert_eq!(lines[1].matches('█').count(), 241);
    }

    #[test]
    fn task_names_sit_in_the_left_column() {
        let lines = demo_lines(200);
        assert!(lines[1].contains("Task 1"));
        assert!(lines[2].contains("Task 2"));
        assert!(lines[3].contains("Task 3"));
    }

    #[test]
    fn narrow_render_scales_the_same_chart() {
        // 100 columns scales every pixel coordinate by 0.1.
        let lines = demo_lines(100);
        let row: Vec<char> = lines[1].chars().collect();
        assert_eq!(row.get(15), Some(&'█'));
        assert_eq!(lines[1].matches('█').count(), 24);
        assert!(lines.iter().all(|line| line.chars().count() <= 100));
    }

    #[test]
    fn header_shows_day_labels_for_a_month_window() {
        let lines = demo_lines(1000);
        assert!(lines[0].contains("01"));
        assert!(lines[0].contains("15"));
    }

    #[test]
    fn header_switches_to_week_labels_when_zoomed_out() {
        let mut store = TimelineStore::demo();
        store.zoom(0.2).unwrap();
        let lines = ChartRenderer::new().render(&store, 1000).to_plain_lines();
        assert!(lines[0].contains('W'), "header was: {:?}", lines[0]);
    }

    #[test]
    fn bars_off_view_draw_nothing() {
        let mut store = TimelineStore::demo();
        store.pan(60.0).unwrap();
        let lines = ChartRenderer::new().render(&store, 200).to_plain_lines();
        for line in &lines[1..] {
            assert!(!line.contains('█'), "stray bar in {line:?}");
        }
    }

    #[test]
    fn milestones_render_as_markers() {
        let day = Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap();
        let tasks = vec![
            Task::new(TaskId::new(1).unwrap(), "Ship it", day, day, Rgba::WHITE).unwrap(),
        ];
        let view = TimeRange::new(
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let store = TimelineStore::new(tasks, view, ChartLayout::default()).unwrap();

        let lines = ChartRenderer::new().render(&store, 500).to_plain_lines();
        assert!(lines[1].contains('◆'), "row was: {:?}", lines[1]);
    }

    #[test]
    fn ascii_mode_uses_ascii_glyphs() {
        let store = TimelineStore::demo();
        let lines = ChartRenderer::new()
            .ascii(true)
            .render(&store, 200)
            .to_plain_lines();
        assert!(lines[1].contains('#'));
        assert!(lines.iter().all(|line| line.is_ascii()));
    }

    #[test]
    fn selection_pointer_marks_one_row() {
        let store = TimelineStore::demo();
        let lines = ChartRenderer::new()
            .selected(Some(1))
            .render(&store, 200)
            .to_plain_lines();
        assert!(lines[2].starts_with('▸'));
        assert!(!lines[1].starts_with('▸'));
    }

    #[test]
    fn grid_marks_major_ticks_in_empty_rows() {
        // Task 3 starts Jan 12, leaving the Jan 1 major tick uncovered.
        let lines = demo_lines(1000);
        let row: Vec<char> = lines[3].chars().collect();
        assert_eq!(row[150], '·');

        let without = ChartRenderer::new()
            .show_grid(false)
            .render(&TimelineStore::demo(), 1000)
            .to_plain_lines();
        assert!(!without[3].contains('·'));
    }

    #[test]
    fn custom_bar_glyph_wins() {
        let lines = ChartRenderer::new()
            .bar_glyph('=')
            .render(&TimelineStore::demo(), 200)
            .to_plain_lines();
        assert!(lines[1].contains('='));
        assert!(!lines[1].contains('█'));
    }

    #[test]
    fn ansi_render_carries_task_colors() {
        let store = TimelineStore::demo();
        let lines = ChartRenderer::new().render(&store, 200).to_ansi_lines();
        // Task 1 is #4E79A7.
        assert!(lines[1].contains("\x1b[38;2;78;121;167m"));
        assert!(lines[1].contains("\x1b[0m"));
    }

    // --- name truncation ---

    #[test]
    fn short_names_pass_through() {
        assert_eq!(truncate_name("Build", 10, "…"), "Build");
    }

    #[test]
    fn long_names_truncate_with_an_ellipsis() {
        assert_eq!(truncate_name("Integration tests", 8, "…"), "Integra…");
    }

    #[test]
    fn wide_names_truncate_by_display_width() {
        // Each CJK glyph is two columns wide.
        assert_eq!(truncate_name("日本語の名前", 7, "…"), "日本語…");
    }
}
