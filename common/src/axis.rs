//! Axis layout: tick positions, tick labels and the bold axis titles.
//!
//! The model is computed once per view; renderers only read it. There is no
//! domain line, only ticks and their labels.

use crate::config::PlotConfig;
use crate::scale::{LinearScale, Scales, DEFAULT_TICK_COUNT};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

impl Orient {
    /// End point of the tick line, relative to the tick origin.
    pub fn tick_line(self) -> (f64, f64) {
        match self {
            Orient::Bottom => (0.0, TICK_SIZE),
            Orient::Left => (-TICK_SIZE, 0.0),
        }
    }

    /// Anchor point of a tick label, relative to the tick origin.
    pub fn label_offset(self) -> (f64, f64) {
        let gap = TICK_SIZE + TICK_PADDING;
        match self {
            Orient::Bottom => (0.0, gap),
            Orient::Left => (-gap, 0.0),
        }
    }

    pub fn label_dy(self) -> &'static str {
        match self {
            Orient::Bottom => "0.71em",
            Orient::Left => "0.32em",
        }
    }

    pub fn text_anchor(self) -> &'static str {
        match self {
            Orient::Bottom => "middle",
            Orient::Left => "end",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Orient::Bottom => "x",
            Orient::Left => "y",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Pixel offset along the axis.
    pub offset: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub dy: Option<&'static str>,
    pub fill: &'static str,
    pub anchor: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    /// Translation of the whole axis group.
    pub origin: (f64, f64),
    pub ticks: Vec<Tick>,
    pub title: Option<AxisTitle>,
}

impl Axis {
    /// Horizontal axis along the bottom margin, titled at its right end.
    pub fn bottom(scale: &LinearScale, config: &PlotConfig) -> Self {
        let ticks = build_ticks(scale);
        let title = AxisTitle {
            text: config.x_title.clone(),
            x: config.width - config.margin.right,
            y: -4.0,
            dy: None,
            fill: "#000",
            anchor: "end",
        };
        Self {
            orient: Orient::Bottom,
            origin: (0.0, config.height - config.margin.bottom),
            ticks,
            title: Some(title),
        }
    }

    /// Vertical axis along the left margin. The title sits beside the topmost
    /// tick label, sharing its baseline.
    pub fn left(scale: &LinearScale, config: &PlotConfig) -> Self {
        let ticks = build_ticks(scale);
        let orient = Orient::Left;
        let title = ticks.last().map(|last| AxisTitle {
            text: config.y_title.clone(),
            x: 4.0,
            y: last.offset,
            dy: Some(orient.label_dy()),
            fill: "currentColor",
            anchor: "start",
        });
        Self {
            orient,
            origin: (config.margin.left, 0.0),
            ticks,
            title,
        }
    }

    pub fn transform(&self) -> String {
        translate(self.origin)
    }

    pub fn tick_transform(&self, tick: &Tick) -> String {
        match self.orient {
            Orient::Bottom => translate((tick.offset, 0.0)),
            Orient::Left => translate((0.0, tick.offset)),
        }
    }
}

fn build_ticks(scale: &LinearScale) -> Vec<Tick> {
    let format = scale.tick_format(DEFAULT_TICK_COUNT);
    scale
        .ticks(DEFAULT_TICK_COUNT)
        .into_iter()
        .map(|value| Tick {
            offset: scale.apply(value),
            label: format(value),
        })
        .collect()
}

fn translate((x, y): (f64, f64)) -> String {
    format!("translate({x},{y})")
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub bottom: Axis,
    pub left: Axis,
}

impl Axes {
    pub fn new(scales: &Scales, config: &PlotConfig) -> Self {
        Self {
            bottom: Axis::bottom(&scales.x, config),
            left: Axis::left(&scales.y, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn axes() -> Axes {
        let config = PlotConfig::default();
        Axes::new(&Scales::new(&config), &config)
    }

    #[test]
    fn bottom_axis_layout() {
        let bottom = axes().bottom;
        assert_eq!(bottom.transform(), "translate(0,370)");
        assert_eq!(bottom.ticks.len(), 11);
        assert_eq!(bottom.ticks[0].offset, 40.0);
        assert_eq!(bottom.ticks[10].offset, 770.0);
        assert_eq!(bottom.ticks[2].label, "10");
        assert_eq!(bottom.tick_transform(&bottom.ticks[10]), "translate(770,0)");
        assert_eq!(
            bottom.title,
            Some(AxisTitle {
                text: "Miles per gallon".to_owned(),
                x: 770.0,
                y: -4.0,
                dy: None,
                fill: "#000",
                anchor: "end",
            })
        );
    }

    #[test]
    fn left_axis_title_follows_last_tick() {
        let left = axes().left;
        assert_eq!(left.transform(), "translate(40,0)");
        assert_eq!(
            left.ticks.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(),
            ["0", "50", "100", "150", "200", "250", "300", "350", "400"]
        );
        let title = left.title.unwrap();
        assert_eq!(title.text, "Horsepower");
        assert_eq!(title.y, 20.0);
        assert_eq!(title.x, 4.0);
        assert_eq!(title.dy, Some("0.32em"));
        assert_eq!(title.anchor, "start");
    }

    #[test]
    fn tick_geometry_by_orientation() {
        assert_eq!(Orient::Bottom.tick_line(), (0.0, 6.0));
        assert_eq!(Orient::Left.tick_line(), (-6.0, 0.0));
        assert_eq!(Orient::Bottom.label_offset(), (0.0, 9.0));
        assert_eq!(Orient::Left.label_offset(), (-9.0, 0.0));
    }
}
