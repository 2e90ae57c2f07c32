//! Chart rendering: a chart series in, a PNG artifact on disk out
//!
//! [`render_chart_sync`] is a pure draw-and-write step with no business
//! logic; [`ChartScheduler`] offloads it to the blocking pool behind a
//! small semaphore so CPU-bound drawing never stalls the message loop.
//! Artifacts are written under a single directory with collision-free
//! generated names; cleanup after delivery belongs to the caller.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use plotters::element::Pie;
use plotters::prelude::*;
use regex::Regex;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::aggregate::ChartSeries;
use crate::error::{Error, Result};

/// Upper bound on simultaneously running renders
pub const MAX_CONCURRENT_RENDERS: usize = 3;

const CHART_WIDTH: u32 = 900;
const CHART_HEIGHT: u32 = 760;
/// Pixel height of the legend strip below the plot area
const LEGEND_HEIGHT: u32 = 160;
const LEGEND_COLUMNS: usize = 3;

/// Qualitative 12-color palette, cycled per slice in series order
const PALETTE: [RGBColor; 12] = [
    RGBColor(141, 211, 199),
    RGBColor(255, 255, 179),
    RGBColor(190, 186, 218),
    RGBColor(251, 128, 114),
    RGBColor(128, 177, 211),
    RGBColor(253, 180, 98),
    RGBColor(179, 222, 105),
    RGBColor(252, 205, 229),
    RGBColor(217, 217, 217),
    RGBColor(188, 128, 189),
    RGBColor(204, 235, 197),
    RGBColor(255, 237, 111),
];

fn emoji_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            "[",
            "\u{1F600}-\u{1F64F}",
            "\u{1F300}-\u{1F5FF}",
            "\u{1F680}-\u{1F6FF}",
            "\u{1F1E0}-\u{1F1FF}",
            "\u{2702}-\u{27B0}",
            "\u{24C2}-\u{1F251}",
            "]+",
        ))
        .expect("emoji pattern is a valid regex")
    })
}

/// Strip emoji and related symbol glyphs from a legend label.
///
/// The bitmap font has no glyphs for these, so keyboard-style labels
/// would otherwise render as tofu boxes.
pub fn strip_emoji(text: &str) -> String {
    emoji_pattern().replace_all(text, "").trim().to_string()
}

/// Render a donut chart for the given labels and values, writing a PNG
/// named `file_name` under `dir`. Returns the artifact path.
///
/// A label/value length mismatch is tolerated (labels are truncated or
/// padded with empty strings) rather than rejected; contract-respecting
/// callers never hit it.
pub fn render_chart_sync(
    labels: &[String],
    values: &[f64],
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);

    info!(
        "Creating chart {} with {} categories",
        file_name,
        labels.len()
    );

    let mut labels: Vec<String> = labels.iter().map(|l| strip_emoji(l)).collect();
    match labels.len().cmp(&values.len()) {
        std::cmp::Ordering::Greater => labels.truncate(values.len()),
        std::cmp::Ordering::Less => labels.resize(values.len(), String::new()),
        std::cmp::Ordering::Equal => {}
    }

    let total: f64 = values.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(Error::Chart(format!(
            "cannot draw a pie with slice sum {}",
            total
        )));
    }

    {
        let root = BitMapBackend::new(&path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| Error::Chart(e.to_string()))?;

        let (plot_area, legend_area) = root.split_vertically((CHART_HEIGHT - LEGEND_HEIGHT) as i32);

        let colors: Vec<RGBColor> = (0..values.len())
            .map(|i| PALETTE[i % PALETTE.len()])
            .collect();

        // Slice labels stay empty; the legend below carries the text
        let slice_labels: Vec<String> = vec![String::new(); values.len()];

        let center = (
            CHART_WIDTH as i32 / 2,
            (CHART_HEIGHT - LEGEND_HEIGHT) as i32 / 2,
        );
        let radius = 230.0;

        let mut pie = Pie::new(&center, &radius, values, &colors, &slice_labels);
        pie.start_angle(90.0);
        pie.donut_hole(radius * 0.5);
        pie.percentages(
            ("sans-serif", 18)
                .into_font()
                .style(FontStyle::Bold)
                .color(&BLACK),
        );

        plot_area
            .draw(&pie)
            .map_err(|e| Error::Chart(e.to_string()))?;

        draw_legend(&legend_area, &labels, values, &colors)?;

        root.present().map_err(|e| Error::Chart(e.to_string()))?;
    }
    debug!("Chart written to {}", path.display());

    Ok(path)
}

/// Legend rows below the plot: color swatch + "label: value€"
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    labels: &[String],
    values: &[f64],
    colors: &[RGBColor],
) -> Result<()> {
    let style = ("sans-serif", 16).into_font().color(&BLACK);
    let col_width = (CHART_WIDTH as i32 - 40) / LEGEND_COLUMNS as i32;

    for (i, (label, value)) in labels.iter().zip(values.iter()).enumerate() {
        let col = (i % LEGEND_COLUMNS) as i32;
        let row = (i / LEGEND_COLUMNS) as i32;
        let x = 20 + col * col_width;
        let y = 16 + row * 28;

        area.draw(&Rectangle::new(
            [(x, y), (x + 14, y + 14)],
            colors[i % colors.len()].filled(),
        ))
        .map_err(|e| Error::Chart(e.to_string()))?;

        let text = format!("{}: {:.2}€", label, value);
        area.draw(&Text::new(text, (x + 22, y + 1), style.clone()))
            .map_err(|e| Error::Chart(e.to_string()))?;
    }

    Ok(())
}

/// Bounded async front-end for [`render_chart_sync`].
///
/// Each call gets its own uniquely named artifact, so concurrent renders
/// for different users share no state and need no locking. Failures
/// propagate unchanged; a deterministic render that failed once will fail
/// again, so there are no retries.
#[derive(Clone)]
pub struct ChartScheduler {
    out_dir: PathBuf,
    permits: Arc<Semaphore>,
}

impl ChartScheduler {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            permits: Arc::new(Semaphore::new(MAX_CONCURRENT_RENDERS)),
        }
    }

    /// Directory artifacts are written to
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render `series` off the cooperative scheduler thread and return
    /// the artifact path. The caller owns (and eventually deletes) the
    /// produced file.
    pub async fn render(&self, series: &ChartSeries) -> Result<PathBuf> {
        let file_name = unique_chart_name();
        debug!("Scheduling chart render {}", file_name);

        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| Error::Chart(format!("render pool closed: {}", e)))?;

        let labels: Vec<String> = series.labels().iter().map(|l| l.to_string()).collect();
        let values = series.values();
        let dir = self.out_dir.clone();

        let path = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            render_chart_sync(&labels, &values, &dir, &file_name)
        })
        .await
        .map_err(|e| Error::Chart(format!("render task failed: {}", e)))??;

        info!("Chart render completed: {}", path.display());
        Ok(path)
    }
}

fn unique_chart_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("chart_{}.png", &id[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, CategoryTotal};

    #[test]
    fn test_strip_emoji() {
        assert_eq!(strip_emoji("🍔 Fast Food"), "Fast Food");
        assert_eq!(strip_emoji("💅 Beauty & Care"), "Beauty & Care");
        assert_eq!(strip_emoji("Transport"), "Transport");
        assert_eq!(strip_emoji("🎉🎁"), "");
    }

    #[test]
    fn test_render_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let labels = vec!["Fast Food".to_string(), "Transport".to_string()];
        let values = vec![50.0, 30.0];

        let path = render_chart_sync(&labels, &values, dir.path(), "chart_test.png").unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_tolerates_label_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();

        // more labels than values
        let path = render_chart_sync(
            &["A".to_string(), "B".to_string(), "C".to_string()],
            &[60.0, 40.0],
            dir.path(),
            "chart_trunc.png",
        )
        .unwrap();
        assert!(path.exists());

        // fewer labels than values
        let path = render_chart_sync(
            &["A".to_string()],
            &[60.0, 40.0],
            dir.path(),
            "chart_pad.png",
        )
        .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_rejects_zero_sum() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_chart_sync(&["A".to_string()], &[0.0], dir.path(), "chart_zero.png")
            .unwrap_err();
        assert!(matches!(err, Error::Chart(_)));
    }

    #[tokio::test]
    async fn test_scheduler_renders_no_data_series() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = ChartScheduler::new(dir.path());

        // the degenerate sentinel series must still draw
        let series = aggregate(&[]).unwrap();
        let path = scheduler.render(&series).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_concurrent_renders_get_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = ChartScheduler::new(dir.path());

        let series = aggregate(&[
            CategoryTotal::new("food_out", 50.0),
            CategoryTotal::new("transport", 30.0),
        ])
        .unwrap();

        let mut handles = Vec::new();
        for _ in 0..6 {
            let scheduler = scheduler.clone();
            let series = series.clone();
            handles.push(tokio::spawn(async move { scheduler.render(&series).await }));
        }

        let mut paths = Vec::new();
        for handle in handles {
            let path = handle.await.unwrap().unwrap();
            assert!(path.exists());
            paths.push(path);
        }

        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 6);
    }
}
