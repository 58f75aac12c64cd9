mod config;
mod fetch;
mod host;
mod plot;

use plot::ScatterPlot;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {

    let config = use_memo((), |_| config::load_config());

    html! {
        <ScatterPlot config={config} />
    }
}

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    yew::Renderer::<App>::new().render();
}
