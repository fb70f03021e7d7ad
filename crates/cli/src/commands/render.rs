use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dgslice_core::services::{CalibrationReport, ResultSink};

/// Tabular report: threshold | size | compression, then the chosen threshold.
pub struct TableSink<W: Write> {
    out: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for TableSink<W> {
    fn emit(&mut self, report: &CalibrationReport) -> Result<()> {
        let out = &mut self.out;
        writeln!(out)?;
        writeln!(out, "Calibration for criterion: {}", report.criterion)?;
        writeln!(
            out,
            "{:<15} | {:<10} | {:<15}",
            "Threshold (tau)", "Slice size", "Compression %"
        )?;
        writeln!(out, "{}", "-".repeat(45))?;
        for s in &report.curve.samples {
            writeln!(out, "{:<15.2} | {:<10} | {:<14.1}%", s.threshold, s.size, s.compression)?;
        }
        writeln!(out)?;
        writeln!(out, "Baseline slice size (tau = 0): {}", report.full_size)?;
        writeln!(out, "Optimal threshold (tau_opt): {:.2}", report.tau_opt())?;
        Ok(())
    }
}

/// Horizontal text bar chart of slice size per threshold, marking the knee.
pub struct BarPlotSink<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> BarPlotSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: 40 }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for BarPlotSink<W> {
    fn emit(&mut self, report: &CalibrationReport) -> Result<()> {
        let max = report.curve.sizes().into_iter().max().unwrap_or(0).max(1);
        let knee = report.knee.map(|k| k.index);

        writeln!(self.out)?;
        writeln!(self.out, "Knee-point calibration (criterion: {})", report.criterion)?;
        for (i, s) in report.curve.samples.iter().enumerate() {
            let len = (s.size * self.width).div_ceil(max);
            let marker = if Some(i) == knee { "  <- tau_opt" } else { "" };
            writeln!(
                self.out,
                "{:>5.2} |{:<w$} {}{}",
                s.threshold,
                "#".repeat(len),
                s.size,
                marker,
                w = self.width
            )?;
        }
        Ok(())
    }
}

/// Persists one SVG curve plot per report.
///
/// With a single criterion the plot goes to `path`; otherwise each plot is
/// written next to it as `<stem>-<criterion>.svg`.
pub struct SvgSink {
    path: PathBuf,
    per_criterion: bool,
    written: Vec<PathBuf>,
}

impl SvgSink {
    pub fn new(path: impl AsRef<Path>, per_criterion: bool) -> Self {
        Self { path: path.as_ref().to_path_buf(), per_criterion, written: Vec::new() }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn target_for(&self, criterion: &str) -> PathBuf {
        if !self.per_criterion {
            return self.path.clone();
        }
        let stem = self.path.file_stem().and_then(|s| s.to_str()).unwrap_or("calibration");
        let safe: String = criterion
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.path.with_file_name(format!("{stem}-{safe}.svg"))
    }
}

impl ResultSink for SvgSink {
    fn emit(&mut self, report: &CalibrationReport) -> Result<()> {
        let target = self.target_for(&report.criterion);
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create plot dir {}", parent.display()))?;
        }
        fs::write(&target, render_svg(report))
            .with_context(|| format!("Failed to write plot at {}", target.display()))?;
        self.written.push(target);
        Ok(())
    }
}

const SVG_WIDTH: f64 = 640.0;
const SVG_HEIGHT: f64 = 400.0;
const MARGIN: f64 = 50.0;

/// Render the (threshold, size) curve with the knee as a dashed vertical line.
pub fn render_svg(report: &CalibrationReport) -> String {
    let plot_w = SVG_WIDTH - 2.0 * MARGIN;
    let plot_h = SVG_HEIGHT - 2.0 * MARGIN;
    let max_size = report.curve.sizes().into_iter().max().unwrap_or(0).max(1) as f64;
    let px = |t: f64| MARGIN + t * plot_w;
    let py = |s: usize| SVG_HEIGHT - MARGIN - (s as f64 / max_size) * plot_h;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SVG_WIDTH}" height="{SVG_HEIGHT}" viewBox="0 0 {SVG_WIDTH} {SVG_HEIGHT}">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="25" text-anchor="middle" font-size="16">Knee-Point Calibration (Criterion: {})</text>"#,
        SVG_WIDTH / 2.0,
        escape_xml(&report.criterion)
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN}" y1="{y0}" x2="{x1}" y2="{y0}" stroke="black"/><line x1="{MARGIN}" y1="{MARGIN}" x2="{MARGIN}" y2="{y0}" stroke="black"/>"#,
        y0 = SVG_HEIGHT - MARGIN,
        x1 = SVG_WIDTH - MARGIN,
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="12">Pruning threshold (tau)</text>"#,
        SVG_WIDTH / 2.0,
        SVG_HEIGHT - 12.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="15" y="{}" text-anchor="middle" font-size="12" transform="rotate(-90 15 {})">Nodes in slice (max {})</text>"#,
        SVG_HEIGHT / 2.0,
        SVG_HEIGHT / 2.0,
        max_size
    );

    let points: Vec<String> = report
        .curve
        .samples
        .iter()
        .map(|s| format!("{:.1},{:.1}", px(s.threshold), py(s.size)))
        .collect();
    let _ = writeln!(
        svg,
        r#"<polyline fill="none" stroke="blue" stroke-width="2" points="{}"/>"#,
        points.join(" ")
    );
    for s in &report.curve.samples {
        let _ = writeln!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="6" height="6" fill="blue"/>"#,
            px(s.threshold) - 3.0,
            py(s.size) - 3.0
        );
    }

    if let Some(knee) = report.knee {
        let x = px(knee.threshold);
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.1}" y1="{MARGIN}" x2="{x:.1}" y2="{}" stroke="red" stroke-dasharray="6,4"/>"#,
            SVG_HEIGHT - MARGIN
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{}" fill="red" font-size="12">Optimal tau ({:.2})</text>"#,
            x + 4.0,
            MARGIN + 12.0,
            knee.threshold
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
