use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;
use yew::prelude::*;

use super::home_control::HomeControl;
use crate::config::{BaseLayer, SharedConfig, ViewerConfig};
use crate::error::Result;
use crate::leaflet;
use crate::model::{AppAction, AppState, Dataset, FeatureId, LoadStatus};
use crate::state::camera::{self, CameraSequence, CameraSequencer, CameraStep, CameraTarget};
use crate::state::{Coverage, department_style, resolve_coverage};
use crate::util::to_js;

type Handler = Closure<dyn FnMut(JsValue)>;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub state: UseReducerHandle<AppState>,
    pub on_home: Callback<()>,
}

struct MapBinding {
    map: leaflet::Map,
}

/// One Leaflet GeoJSON layer per department, indexed like the feature store.
struct DepartmentLayers {
    layers: Vec<leaflet::GeoJson>,
    coverage: Vec<Coverage>,
    _handlers: Vec<Handler>,
}

impl DepartmentLayers {
    fn get(&self, id: FeatureId) -> Option<&leaflet::GeoJson> {
        self.layers.get(id.0)
    }

    fn restyle(&self, emphasized: Option<FeatureId>) {
        for (i, (layer, coverage)) in self.layers.iter().zip(&self.coverage).enumerate() {
            let style = department_style(*coverage, emphasized == Some(FeatureId(i)), false);
            match to_js(&style) {
                Ok(style) => {
                    layer.set_style(&style);
                }
                Err(err) => log::warn!("style for department {i}: {err}"),
            }
        }
        if let Some(layer) = emphasized.and_then(|id| self.get(id)) {
            layer.bring_to_front();
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions {
    attribution: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subdomains: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_zoom: Option<u8>,
}

impl From<&BaseLayer> for TileOptions {
    fn from(layer: &BaseLayer) -> Self {
        Self {
            attribution: layer.attribution,
            subdomains: layer.subdomains,
            max_zoom: layer.max_zoom,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TooltipOptions {
    permanent: bool,
    direction: &'static str,
    class_name: &'static str,
    opacity: f64,
}

const TOOLTIP: TooltipOptions = TooltipOptions {
    permanent: false,
    direction: "top",
    class_name: "custom-tooltip",
    opacity: 1.0,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlyOptions {
    duration: f64,
    ease_linearity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<[u32; 2]>,
}

fn mount_map(container: &HtmlElement, config: &ViewerConfig) -> Result<MapBinding> {
    let renderer_options = leaflet::options(&[("padding", config.canvas_padding.into())])?;
    let renderer = leaflet::canvas_renderer(&renderer_options);
    let options = leaflet::options(&[
        ("center", leaflet::lat_lng(config.home.center)),
        ("zoom", config.home.zoom.into()),
        ("preferCanvas", JsValue::TRUE),
        ("renderer", renderer),
    ])?;
    let map = leaflet::create_map(container, &options);

    let initial = config.initial_base_layer().map(|l| l.label);
    let base_layers = Object::new();
    for layer in &config.base_layers {
        let tiles = leaflet::tile_layer(layer.url, &to_js(&TileOptions::from(layer))?);
        if initial == Some(layer.label) {
            tiles.add_to(&map);
        }
        Reflect::set(&base_layers, &JsValue::from_str(layer.label), &tiles)?;
    }
    leaflet::layers_control(&base_layers, &JsValue::UNDEFINED).add_control_to(&map);

    Ok(MapBinding { map })
}

fn build_departments(
    map: &leaflet::Map,
    data: &Dataset,
    state_ref: Rc<RefCell<UseReducerHandle<AppState>>>,
) -> Result<DepartmentLayers> {
    let tooltip = to_js(&TOOLTIP)?;
    let count = data.departments.len();
    let mut layers = Vec::with_capacity(count);
    let mut coverage = Vec::with_capacity(count);
    let mut handlers = Vec::with_capacity(count * 3);

    for (i, feature) in data.departments.features().iter().enumerate() {
        let id = FeatureId(i);
        let cov = resolve_coverage(feature, &data.active_codes);
        let options = leaflet::options(&[("style", to_js(&department_style(cov, false, false))?)])?;
        let layer = leaflet::geo_json(&to_js(&feature.source)?, &options);
        if let Some(name) = &feature.name {
            layer.bind_tooltip(name, &tooltip);
        }

        let mouseover: Handler = {
            let layer = layer.clone();
            let state_ref = state_ref.clone();
            Closure::wrap(Box::new(move |_: JsValue| {
                let emphasized = state_ref.borrow().emphasized_feature() == Some(id);
                if let Ok(style) = to_js(&department_style(cov, emphasized, true)) {
                    layer.set_style(&style);
                    layer.bring_to_front();
                }
            }) as Box<dyn FnMut(JsValue)>)
        };
        let mouseout: Handler = {
            let layer = layer.clone();
            let state_ref = state_ref.clone();
            Closure::wrap(Box::new(move |_: JsValue| {
                let emphasized = state_ref.borrow().emphasized_feature() == Some(id);
                if let Ok(style) = to_js(&department_style(cov, emphasized, false)) {
                    layer.set_style(&style);
                }
            }) as Box<dyn FnMut(JsValue)>)
        };
        let click: Handler = {
            let state_ref = state_ref.clone();
            Closure::wrap(Box::new(move |_: JsValue| {
                // release the cell before dispatching; the re-render writes to it
                let handle = state_ref.borrow().clone();
                handle.dispatch(AppAction::SelectDepartment(id));
            }) as Box<dyn FnMut(JsValue)>)
        };
        layer.on_event("mouseover", mouseover.as_ref().unchecked_ref());
        layer.on_event("mouseout", mouseout.as_ref().unchecked_ref());
        layer.on_event("click", click.as_ref().unchecked_ref());
        layer.add_to(map);

        layers.push(layer);
        coverage.push(cov);
        handlers.extend([mouseover, mouseout, click]);
    }

    Ok(DepartmentLayers {
        layers,
        coverage,
        _handlers: handlers,
    })
}

/// Everything a running camera sequence needs, cheap to clone into callbacks.
#[derive(Clone)]
struct CameraRig {
    config: SharedConfig,
    binding: Rc<RefCell<Option<MapBinding>>>,
    departments: Rc<RefCell<Option<DepartmentLayers>>>,
    sequencer: Rc<RefCell<CameraSequencer>>,
    pause: Rc<RefCell<Option<Timeout>>>,
}

impl CameraRig {
    fn map(&self) -> Option<leaflet::Map> {
        self.binding.borrow().as_ref().map(|b| b.map.clone())
    }

    fn cancel_pause(&self) {
        if let Some(timeout) = self.pause.borrow_mut().take() {
            timeout.cancel();
        }
    }

    fn start(&self, target: CameraTarget) {
        self.cancel_pause();
        let token = self.sequencer.borrow_mut().begin();
        log::debug!("camera -> {:?}", target);
        let steps = camera::plan(target, &self.config.camera);
        self.advance(CameraSequence::new(token, steps));
    }

    fn fly_options(&self, duration: f64, padding: Option<(u32, u32)>) -> Result<JsValue> {
        to_js(&FlyOptions {
            duration,
            ease_linearity: self.config.camera.ease_linearity,
            padding: padding.map(|(x, y)| [x, y]),
        })
    }

    fn advance(&self, mut sequence: CameraSequence) {
        let step = sequence.next_step(&self.sequencer.borrow());
        let Some(step) = step else {
            return;
        };
        let Some(map) = self.map() else {
            return;
        };
        let home = self.config.home;
        match step {
            CameraStep::JumpHome => {
                map.set_view(&leaflet::lat_lng(home.center), home.zoom);
                self.advance(sequence);
            }
            CameraStep::FlyHome => {
                let options = match self.fly_options(self.config.camera.home_duration_secs, None) {
                    Ok(o) => o,
                    Err(err) => {
                        log::warn!("camera options: {err}");
                        return;
                    }
                };
                let rig = self.clone();
                let on_end = Closure::once_into_js(move || rig.advance(sequence));
                map.once("moveend", on_end.unchecked_ref::<Function>());
                map.fly_to(&leaflet::lat_lng(home.center), home.zoom, &options);
            }
            CameraStep::Pause { ms } => {
                let rig = self.clone();
                let timeout = Timeout::new(ms, move || rig.advance(sequence));
                *self.pause.borrow_mut() = Some(timeout);
            }
            CameraStep::Stop => {
                map.stop();
                self.advance(sequence);
            }
            CameraStep::FrameDepartment(id) => {
                let departments = self.departments.borrow();
                let Some(layer) = departments.as_ref().and_then(|d| d.get(id)) else {
                    return;
                };
                let bounds = layer.get_bounds();
                if !bounds.is_valid() {
                    log::warn!("department {:?} has no drawable bounds", id);
                    return;
                }
                let camera = self.config.camera;
                match self.fly_options(camera.target_duration_secs, Some(camera.frame_padding_px)) {
                    Ok(options) => {
                        map.fly_to_bounds(&bounds, &options);
                    }
                    Err(err) => log::warn!("camera options: {err}"),
                }
            }
        }
    }
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let config = use_context::<SharedConfig>().unwrap_or_default();
    let container_ref = use_node_ref();
    let binding = use_mut_ref(|| None::<MapBinding>);
    let departments = use_mut_ref(|| None::<DepartmentLayers>);
    let sequencer = use_mut_ref(CameraSequencer::default);
    let pause = use_mut_ref(|| None::<Timeout>);
    let state_ref = use_mut_ref(|| props.state.clone());
    // Leaflet callbacks read the newest reducer handle, not the one captured at build time
    *state_ref.borrow_mut() = props.state.clone();

    let rig = CameraRig {
        config: config.clone(),
        binding: binding.clone(),
        departments: departments.clone(),
        sequencer: sequencer.clone(),
        pause: pause.clone(),
    };

    // Mount: create the map once, tear it down on unmount
    {
        let container_ref = container_ref.clone();
        let rig = rig.clone();
        use_effect_with((), move |_| {
            match container_ref.cast::<HtmlElement>() {
                Some(container) => match mount_map(&container, &rig.config) {
                    Ok(b) => *rig.binding.borrow_mut() = Some(b),
                    Err(err) => log::error!("could not create map: {err}"),
                },
                None => log::error!("map container missing"),
            }
            move || {
                rig.cancel_pause();
                rig.sequencer.borrow_mut().begin();
                rig.departments.borrow_mut().take();
                if let Some(b) = rig.binding.borrow_mut().take() {
                    b.map.remove();
                }
            }
        });
    }
    // Draw department polygons once data is in
    {
        let binding = binding.clone();
        let departments = departments.clone();
        let state_ref = state_ref.clone();
        let data = props.state.data.clone();
        use_effect_with(props.state.status, move |status| {
            if *status == LoadStatus::Ready && departments.borrow().is_none() {
                let map = binding.borrow().as_ref().map(|b| b.map.clone());
                if let (Some(map), Some(data)) = (map, data) {
                    match build_departments(&map, &data, state_ref) {
                        Ok(layers) => *departments.borrow_mut() = Some(layers),
                        Err(err) => log::error!("could not draw departments: {err}"),
                    }
                }
            }
            || ()
        });
    }
    // Repaint when the emphasized department changes
    {
        let departments = departments.clone();
        let emphasized = props.state.emphasized_feature();
        use_effect_with((props.state.status, emphasized), move |(_, emphasized)| {
            if let Some(layers) = departments.borrow().as_ref() {
                layers.restyle(*emphasized);
            }
            || ()
        });
    }
    // Replay camera requests
    {
        let rig = rig.clone();
        use_effect_with(props.state.camera.clone(), move |request| {
            if let Some(target) = request.target {
                rig.start(target);
            }
            || ()
        });
    }

    html! {
        <div style="position:relative; flex:1; height:100vh;">
            <div ref={container_ref} id="map" style="width:100%; height:100%;"></div>
            <HomeControl on_home={props.on_home.clone()} />
        </div>
    }
}
