mod components;
mod config;
mod error;
mod leaflet;
mod loader;
mod model;
mod state;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("cobertura-bancos starting");
    yew::Renderer::<App>::new().render();
}
