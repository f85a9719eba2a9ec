use super::legend::LegendRow;
use crate::state::style::{COVERED_STYLE, UNCOVERED_STYLE};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    /// Departments with at least one bank; `None` until data loads.
    pub covered: Option<usize>,
    pub uncovered: Option<usize>,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    html! {<div class="legend" style="border:1px solid #30363d; border-radius:8px; padding:8px; margin:8px 0;">
        <div style="font-weight:600; margin-bottom:4px;">{"Convenciones"}</div>
        <LegendRow color={COVERED_STYLE.fill_color} label="Con bancos aliados" count={props.covered} />
        <LegendRow color={UNCOVERED_STYLE.fill_color} label="Sin cobertura" count={props.uncovered} />
    </div>}
}
