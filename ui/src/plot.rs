use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use jitterplot_common::{Axis, LoadPhase, Point, PlotConfig, RandomJitter, ScatterPlotView};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::fetch::Fetch;
use crate::host::BrowserHost;

type View = ScatterPlotView<BrowserHost>;

#[derive(Debug, PartialEq, Properties)]
struct AxisGroupProps {
    axis: Axis,
}

/// Axes only depend on the config, so yew skips them on every later render.
#[function_component(AxisGroup)]
fn axis_group(AxisGroupProps { axis }: &AxisGroupProps) -> Html {
    let orient = axis.orient;
    let (line_x, line_y) = orient.tick_line();
    let (label_x, label_y) = orient.label_offset();

    html! {
        <g class={classes!(orient.class(), "axis")}
           transform={axis.transform()}
           fill="none"
           font-size="10"
           font-family="sans-serif"
           text-anchor={orient.text_anchor()}>
        {
            for axis.ticks.iter().map(|tick| html! {
                <g class="tick" transform={axis.tick_transform(tick)}>
                    <line stroke="currentColor" x2={line_x.to_string()} y2={line_y.to_string()} />
                    <text fill="currentColor"
                          x={label_x.to_string()}
                          y={label_y.to_string()}
                          dy={orient.label_dy()}>
                        { tick.label.clone() }
                    </text>
                </g>
            })
        }
        if let Some(title) = &axis.title {
            <text x={title.x.to_string()}
                  y={title.y.to_string()}
                  dy={title.dy}
                  fill={title.fill}
                  font-weight="bold"
                  text-anchor={title.anchor}>
                { title.text.clone() }
            </text>
        }
        </g>
    }
}

#[derive(Debug, PartialEq, Properties)]
pub struct ScatterPlotProps {
    pub config: Rc<PlotConfig>,
}

#[function_component(ScatterPlot)]
pub fn scatter_plot(ScatterPlotProps { config }: &ScatterPlotProps) -> Html {

    let update = use_update();
    let view = {
        let update = update.clone();
        use_memo(config.clone(), move |config| {
            View::mount(
                (**config).clone(),
                Rc::new(BrowserHost),
                Box::new(RandomJitter::from_entropy(config.max_offset)),
                move || update(),
            )
            .map(Rc::new)
            .map_err(|err| err.to_string())
        })
    };

    {
        let view = view.clone();
        use_effect_with(config.clone(), move |_| {
            let view = (*view).as_ref().ok().cloned();
            if let Some(view) = view.clone() {
                let url = view.config().dataset_url.clone();
                yew::platform::spawn_local(async move {
                    let result = Vec::<Point>::fetch(&url).await;
                    view.load(result);
                });
            }
            move || {
                if let Some(view) = view {
                    view.unmount();
                }
            }
        });
    }

    // Keep redrawing while any marker is mid-transition.
    let frame = use_mut_ref(|| None::<AnimationFrame>);
    {
        let view = view.clone();
        let update = update.clone();
        use_effect(move || {
            let animating = match &*view {
                Ok(view) => view.markers().is_animating(view.now_ms()),
                Err(_) => false,
            };
            *frame.borrow_mut() = animating.then(|| request_animation_frame(move |_| update()));
            || ()
        });
    }

    let view = match &*view {
        Ok(view) => view,
        Err(message) => {
            return html! {
                <p class="config-error">{ format!("Invalid plot configuration: {message}") }</p>
            }
        }
    };

    let config = view.config();
    let style = &config.marker;
    let now = view.now_ms();
    let axes = view.axes();

    let dots: Html = view
        .markers()
        .markers()
        .iter()
        .map(|marker| html! {
            <g class="dots" transform={marker.position_at(now).translate()}>
                <circle stroke={style.stroke.clone()} fill="none" r={style.radius.to_string()} />
                <text dy="0.35em" x={style.label_dx.to_string()}>{ marker.name().to_owned() }</text>
            </g>
        })
        .collect();

    let load_error = match view.phase() {
        LoadPhase::Failed(message) => Some(format!("Could not load data: {message}")),
        LoadPhase::Loading | LoadPhase::Ready => None,
    };

    html! {
        <svg width={config.width.to_string()} height={config.height.to_string()}>
            <AxisGroup axis={axes.bottom.clone()} />
            <AxisGroup axis={axes.left.clone()} />
            <g class="dots-container"
               stroke-width={style.stroke_width.to_string()}
               font-family={style.font_family.clone()}
               font-size={style.font_size.to_string()}>
                { dots }
            </g>
            if let Some(message) = load_error {
                <text class="load-error"
                      x={(config.margin.left + 8.0).to_string()}
                      y={(config.margin.top + 16.0).to_string()}
                      fill="firebrick"
                      font-family="sans-serif">
                    { message }
                </text>
            }
        </svg>
    }
}
