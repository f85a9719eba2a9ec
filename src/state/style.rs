// Polygon paint styles. Field names serialize to Leaflet's path options.
use serde::Serialize;

use crate::model::{ActiveCodeSet, DepartmentFeature};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub fill_color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub color: &'static str,
    pub dash_array: &'static str,
    pub fill_opacity: f64,
}

/// Partial style laid over a base style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleOverlay {
    pub weight: f64,
    pub color: &'static str,
    pub dash_array: &'static str,
    pub fill_opacity: f64,
}

pub const COVERED_STYLE: PathStyle = PathStyle {
    fill_color: "#D2DE38",
    weight: 2.0,
    opacity: 1.0,
    color: "white",
    dash_array: "3",
    fill_opacity: 0.6,
};

pub const UNCOVERED_STYLE: PathStyle = PathStyle {
    fill_color: "#333333",
    weight: 1.5,
    opacity: 1.0,
    color: "#666666",
    dash_array: "3",
    fill_opacity: 0.7,
};

pub const EMPHASIS: StyleOverlay = StyleOverlay {
    weight: 5.0,
    color: "#F58634",
    dash_array: "",
    fill_opacity: 0.7,
};

pub const HOVER: StyleOverlay = StyleOverlay {
    weight: 3.0,
    color: "#666",
    dash_array: "",
    fill_opacity: 0.8,
};

impl PathStyle {
    pub const fn with(self, overlay: StyleOverlay) -> PathStyle {
        PathStyle {
            fill_color: self.fill_color,
            opacity: self.opacity,
            weight: overlay.weight,
            color: overlay.color,
            dash_array: overlay.dash_array,
            fill_opacity: overlay.fill_opacity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    Covered,
    Uncovered,
}

/// Covered iff the feature's code is referenced by some bank.
/// A feature without a code is never covered.
pub fn resolve_coverage(feature: &DepartmentFeature, active: &ActiveCodeSet) -> Coverage {
    if active.contains(feature.code.as_deref()) {
        Coverage::Covered
    } else {
        Coverage::Uncovered
    }
}

pub fn base_style(coverage: Coverage) -> PathStyle {
    match coverage {
        Coverage::Covered => COVERED_STYLE,
        Coverage::Uncovered => UNCOVERED_STYLE,
    }
}

pub fn department_style(coverage: Coverage, emphasized: bool, hovered: bool) -> PathStyle {
    let mut style = base_style(coverage);
    if emphasized {
        style = style.with(EMPHASIS);
    }
    if hovered {
        style = style.with(HOVER);
    }
    style
}
