use chrono::{Datelike, NaiveDate};
use log::info;
use std::path::Path;

use svg::{
    node::element::{path::Data, Circle, Line, Path as SvgPath, Text},
    Document,
};

use crate::lib::entry::{Amount, FinanceRecord};

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("no data to plot")]
    NoData,
    #[error("could not write chart: {0}")]
    Io(#[from] std::io::Error),
}

/// Spending and saving over time, as an SVG line chart
pub struct Plotter<'d> {
    data: &'d [FinanceRecord],
}

impl<'d> Plotter<'d> {
    pub fn new(data: &'d [FinanceRecord]) -> Self {
        Self { data }
    }

    /// Write the chart to `file`
    pub fn save(&self, file: &Path) -> Result<(), PlotError> {
        let document = self.document()?;
        svg::save(file, &document)?;
        info!("chart of {} records written to {}", self.data.len(), file.display());
        Ok(())
    }

    pub fn document(&self) -> Result<Document, PlotError> {
        if self.data.is_empty() {
            return Err(PlotError::NoData);
        }
        Ok(self.line_plot().to_line_drawer().render())
    }

    fn line_plot(&self) -> Plot<NaiveDate, Amount> {
        let mut records = self.data.to_vec();
        // stable: same-day records keep their insertion order
        records.sort_by_key(|r| r.date);
        let mut plot = Plot::new();
        for rec in records {
            plot.push(rec.date, vec![rec.spending, rec.saving]);
        }
        plot
    }
}

#[derive(Debug)]
pub struct Plot<X, Y> {
    data: Vec<(X, Vec<Y>)>,
}

impl<X, Y> Plot<X, Y> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn push(&mut self, x: X, y: Vec<Y>) {
        self.data.push((x, y));
    }
}

pub trait Scalar {
    fn to_scalar(&self) -> i64;
}

impl Scalar for Amount {
    fn to_scalar(&self) -> i64 {
        // clamped, the chart scale is signed
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

impl Scalar for NaiveDate {
    fn to_scalar(&self) -> i64 {
        self.num_days_from_ce() as i64
    }
}

impl<X, Y> Plot<X, Y>
where
    X: Scalar,
    Y: Scalar,
{
    fn to_line_drawer(&self) -> LineDrawer {
        LineDrawer {
            points: self
                .data
                .iter()
                .map(|(x, ys)| (x.to_scalar(), ys.iter().map(|y| y.to_scalar()).collect()))
                .collect::<Vec<_>>(),
        }
    }
}

/// One polyline per series, all series sharing the same abscissas
#[derive(Debug)]
struct LineDrawer {
    points: Vec<(i64, Vec<i64>)>,
}

impl LineDrawer {
    fn render(&self) -> Document {
        let (xmin, width, height) = {
            let mut xmin = i64::MAX;
            let mut xmax = i64::MIN;
            // amounts are never negative, the x axis stays at the bottom
            let mut ymax = 0;
            for (x, ys) in &self.points {
                xmin = xmin.min(*x);
                xmax = xmax.max(*x);
                for y in ys {
                    ymax = ymax.max(*y);
                }
            }
            (xmin, (xmax - xmin).max(1), ymax.max(1))
        };
        let fheight = 400.0;
        let fwidth = 900.0;
        let stroke_width = 2.0;
        let margin = 40.0;
        let resize_x = |x: i64| (x - xmin) as f64 / width as f64 * fwidth;
        let resize_y = |y: i64| (height - y) as f64 / height as f64 * fheight;

        let group_size = self.points[0].1.len();
        let mut document = Document::new();
        for i in 0..group_size {
            let (x0, ys0) = &self.points[0];
            let data = self.points[1..]
                .iter()
                .fold(Data::new().move_to((resize_x(*x0), resize_y(ys0[i]))), |d, (x, ys)| {
                    d.line_to((resize_x(*x), resize_y(ys[i])))
                });
            document = document.add(
                SvgPath::new()
                    .set("fill", "none")
                    .set("stroke", COLORS[i])
                    .set("stroke-width", stroke_width)
                    .set("d", data),
            );
            for (x, ys) in &self.points {
                document = document.add(
                    Circle::new()
                        .set("cx", resize_x(*x))
                        .set("cy", resize_y(ys[i]))
                        .set("r", stroke_width * 1.5)
                        .set("fill", COLORS[i]),
                );
            }
            document = document.add(
                Text::new()
                    .set("x", fwidth - 100.0)
                    .set("y", 20.0 * (i + 1) as f64)
                    .set("fill", COLORS[i])
                    .add(svg::node::Text::new(LABELS[i])),
            );
        }
        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", stroke_width);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", fwidth)
            .set("y1", resize_y(0))
            .set("y2", resize_y(0))
            .set("stroke", "black")
            .set("stroke-width", stroke_width);
        let xlabel = Text::new()
            .set("x", fwidth / 2.0)
            .set("y", fheight + margin / 2.0)
            .add(svg::node::Text::new("Date"));
        let ylabel = Text::new()
            .set("x", -margin + 4.0)
            .set("y", -margin / 4.0)
            .add(svg::node::Text::new("Amount"));
        document
            .add(yaxis)
            .add(xaxis)
            .add(xlabel)
            .add(ylabel)
            .set("viewBox", (-margin, -margin, fwidth + 2.0 * margin, fheight + 2.0 * margin))
    }
}

const COLORS: &[&str] = &["#FF5C5C", "#6A5ACD"];
const LABELS: &[&str] = &["Spending", "Saving"];
