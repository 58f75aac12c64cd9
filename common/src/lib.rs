//! Platform-independent core of the jitterplot scatter view.
//!
//! Everything here runs natively: the browser crate only supplies a
//! [`TimerHost`] backed by real timers and turns the view model into SVG.

pub mod axis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod jitter;
pub mod marker;
pub mod point;
pub mod scale;
pub mod scheduler;
pub mod store;
pub mod timer;
pub mod view;

pub use axis::{Axes, Axis, AxisTitle, Orient, Tick};
pub use config::{Extent, Margin, MarkerStyle, PlotConfig};
pub use dataset::parse_csv;
pub use error::{ConfigError, Error, Result};
pub use jitter::{perturb, Jitter, RandomJitter};
pub use marker::{JoinSummary, Marker, MarkerLayer, Position};
pub use point::Point;
pub use scale::{LinearScale, Scales};
pub use scheduler::PerturbationScheduler;
pub use store::{Store, Subscription};
pub use timer::{ManualHost, TimerHost};
pub use view::{LoadPhase, ScatterPlotView};
