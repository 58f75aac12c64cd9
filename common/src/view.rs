//! Headless scatter-plot component.
//!
//! [`ScatterPlotView`] owns the dataset store, the perturbation loop and the
//! marker layer. Renderers read it and re-draw whenever `on_change` fires.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, error, info, trace};

use crate::axis::Axes;
use crate::config::PlotConfig;
use crate::error::{ConfigError, Error};
use crate::jitter::Jitter;
use crate::marker::MarkerLayer;
use crate::point::Point;
use crate::scale::Scales;
use crate::scheduler::PerturbationScheduler;
use crate::store::{Store, Subscription};
use crate::timer::TimerHost;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

pub struct ScatterPlotView<H: TimerHost> {
    config: PlotConfig,
    host: Rc<H>,
    scales: Scales,
    axes: Axes,
    store: Store<Vec<Point>>,
    markers: Rc<RefCell<MarkerLayer>>,
    phase: RefCell<LoadPhase>,
    scheduler: PerturbationScheduler<H>,
    render: RefCell<Option<Subscription>>,
    on_change: Rc<dyn Fn()>,
    mounted: Cell<bool>,
}

impl<H: TimerHost> ScatterPlotView<H> {
    /// Validates `config`, lays out scales and axes, wires the marker layer to
    /// the dataset store and starts the perturbation loop.
    pub fn mount(
        config: PlotConfig,
        host: Rc<H>,
        jitter: Box<dyn Jitter>,
        on_change: impl Fn() + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let scales = Scales::new(&config);
        let axes = Axes::new(&scales, &config);
        let store = Store::new(Vec::new());
        let markers = Rc::new(RefCell::new(MarkerLayer::new(config.transition_ms)));
        let on_change: Rc<dyn Fn()> = Rc::new(on_change);

        let render = {
            let host = Rc::clone(&host);
            let markers = Rc::clone(&markers);
            let on_change = Rc::clone(&on_change);
            store.subscribe(move |points: &Rc<Vec<Point>>| {
                let summary = markers
                    .borrow_mut()
                    .join(points, &scales, host.now_ms());
                trace!(?summary, "joined markers");
                on_change();
            })
        };

        let scheduler = PerturbationScheduler::start(
            Rc::clone(&host),
            store.clone(),
            jitter,
            config.x_extent,
            config.y_extent,
            config.interval_ms,
        );

        Ok(Self {
            config,
            host,
            scales,
            axes,
            store,
            markers,
            phase: RefCell::new(LoadPhase::Loading),
            scheduler,
            render: RefCell::new(Some(render)),
            on_change,
            mounted: Cell::new(true),
        })
    }

    /// Installs the outcome of the initial fetch. A failure leaves the plot
    /// empty and stops the perturbation loop, since no data will ever arrive.
    pub fn load(&self, result: Result<Vec<Point>, Error>) {
        if !self.mounted.get() {
            debug!("dataset arrived after unmount; dropping it");
            return;
        }
        match result {
            Ok(points) => {
                info!(points = points.len(), "dataset loaded");
                *self.phase.borrow_mut() = LoadPhase::Ready;
                self.store.set(points);
            }
            Err(err) => {
                error!(error = %err, url = %self.config.dataset_url, "failed to load dataset");
                *self.phase.borrow_mut() = LoadPhase::Failed(err.to_string());
                self.scheduler.cancel();
                (self.on_change)();
            }
        }
    }

    /// Stops the loop and detaches the renderer. After this returns nothing
    /// in the view changes again.
    pub fn unmount(&self) {
        if !self.mounted.replace(false) {
            return;
        }
        self.scheduler.cancel();
        self.render.borrow_mut().take();
        debug!("scatter plot unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase.borrow().clone()
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn dataset(&self) -> Rc<Vec<Point>> {
        self.store.get()
    }

    pub fn markers(&self) -> Ref<'_, MarkerLayer> {
        self.markers.borrow()
    }

    pub fn now_ms(&self) -> f64 {
        self.host.now_ms()
    }

    pub fn scheduler(&self) -> &PerturbationScheduler<H> {
        &self.scheduler
    }
}

impl<H: TimerHost> Drop for ScatterPlotView<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
