//! Tunable constants for the viewer, provided to components through context.

use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HomeView {
    pub center: LatLng,
    pub zoom: f64,
}

/// Timings for the two-phase "go home, then frame the target" flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTiming {
    pub home_duration_secs: f64,
    pub target_duration_secs: f64,
    pub ease_linearity: f64,
    /// Wait between reaching home and starting the second flight.
    pub pause_ms: u32,
    pub frame_padding_px: (u32, u32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BaseLayer {
    /// Label shown in the layer switcher; also the persisted preference value.
    pub label: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
    pub subdomains: Option<&'static str>,
    pub max_zoom: Option<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataSources {
    pub boundaries_url: String,
    pub banks_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub sources: DataSources,
    pub home: HomeView,
    pub camera: CameraTiming,
    pub base_layers: Vec<BaseLayer>,
    /// Label of the layer shown when the map opens.
    pub default_base_layer: &'static str,
    pub canvas_padding: f64,
    pub empty_department_message: &'static str,
}

const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            sources: DataSources {
                boundaries_url: "mapa/ColDepSNVlite.geojson".to_string(),
                banks_url: "data/bancos.json".to_string(),
            },
            home: HomeView {
                center: LatLng {
                    lat: 4.570868,
                    lng: -74.297333,
                },
                zoom: 6.0,
            },
            camera: CameraTiming {
                home_duration_secs: 1.0,
                target_duration_secs: 1.5,
                ease_linearity: 0.25,
                pause_ms: 125,
                frame_padding_px: (50, 50),
            },
            base_layers: vec![
                BaseLayer {
                    label: "Oscuro",
                    url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
                    attribution: CARTO_ATTRIBUTION,
                    subdomains: Some("abcd"),
                    max_zoom: Some(20),
                },
                BaseLayer {
                    label: "Claro",
                    url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
                    attribution: CARTO_ATTRIBUTION,
                    subdomains: Some("abcd"),
                    max_zoom: Some(20),
                },
                BaseLayer {
                    label: "Calle",
                    url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
                    attribution: OSM_ATTRIBUTION,
                    subdomains: None,
                    max_zoom: None,
                },
            ],
            default_base_layer: "Oscuro",
            canvas_padding: 1.5,
            empty_department_message: "No hay bancos registrados en este departamento.",
        }
    }
}

impl ViewerConfig {
    /// The default base layer, or the first one if the default is not listed.
    pub fn initial_base_layer(&self) -> Option<&BaseLayer> {
        self.base_layers
            .iter()
            .find(|l| l.label == self.default_base_layer)
            .or_else(|| self.base_layers.first())
    }
}

pub type SharedConfig = Rc<ViewerConfig>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn map_opens_on_the_dark_layer() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.initial_base_layer().map(|l| l.label), Some("Oscuro"));
    }

    #[test]
    fn unlisted_default_falls_back_to_first_layer() {
        let cfg = ViewerConfig {
            default_base_layer: "Satélite",
            ..ViewerConfig::default()
        };
        assert_eq!(cfg.initial_base_layer().map(|l| l.label), Some("Oscuro"));

        let empty = ViewerConfig {
            base_layers: Vec::new(),
            ..ViewerConfig::default()
        };
        assert_eq!(empty.initial_base_layer(), None);
    }
}
