//! Point markers reconciled by index against each new dataset.
//!
//! A join classifies every index as enter, update or exit. Entering markers
//! appear in place, updated markers glide to their new position, and exiting
//! markers are dropped at once. Identity is the array index, so reordering
//! the dataset moves labels along with the wrong points.

use crate::point::Point;
use crate::scale::Scales;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn lerp(self, to: Position, t: f64) -> Position {
        Position::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }

    /// SVG `transform` value, or `None` when the position cannot be drawn.
    pub fn translate(&self) -> Option<String> {
        (self.x.is_finite() && self.y.is_finite())
            .then(|| format!("translate({},{})", self.x, self.y))
    }
}

/// Cubic ease-in-out on `t ∈ [0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Transition {
    from: Position,
    to: Position,
    start: f64,
    duration: f64,
}

impl Transition {
    fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    fn sample(&self, now: f64) -> Position {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, ease_cubic_in_out(t))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    name: String,
    position: Position,
    transition: Option<Transition>,
}

impl Marker {
    fn enter(point: &Point, position: Position) -> Self {
        Self {
            name: point.name.clone(),
            position,
            transition: None,
        }
    }

    /// Label text, fixed when the marker entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resting position, i.e. where the marker ends up once its transition
    /// completes.
    pub fn target(&self) -> Position {
        self.position
    }

    pub fn position_at(&self, now: f64) -> Position {
        match &self.transition {
            Some(transition) => transition.sample(now),
            None => self.position,
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.transition
            .is_some_and(|transition| transition.progress(now) < 1.0)
    }

    fn move_to(&mut self, to: Position, now: f64, duration: f64) {
        let from = self.position_at(now);
        self.position = to;
        self.transition = Some(Transition {
            from,
            to,
            start: now,
            duration,
        });
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinSummary {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    transition_ms: f64,
}

impl MarkerLayer {
    pub fn new(transition_ms: f64) -> Self {
        Self {
            markers: Vec::new(),
            transition_ms,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn join(&mut self, points: &[Point], scales: &Scales, now: f64) -> JoinSummary {
        self.settle(now);
        let exited = self.markers.len().saturating_sub(points.len());
        self.markers.truncate(points.len());

        let updated = self.markers.len();
        for (marker, point) in self.markers.iter_mut().zip(points) {
            marker.move_to(scales.project(point), now, self.transition_ms);
        }

        let entered = points.len() - updated;
        self.markers.extend(
            points[updated..]
                .iter()
                .map(|point| Marker::enter(point, scales.project(point))),
        );

        JoinSummary {
            entered,
            updated,
            exited,
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.markers.iter().any(|marker| marker.is_animating(now))
    }

    /// Drops transitions that have finished by `now`.
    pub fn settle(&mut self, now: f64) {
        for marker in &mut self.markers {
            if !marker.is_animating(now) {
                marker.transition = None;
            }
        }
    }
}
