use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub bank_count: usize,
    pub covered: usize,
    pub total: usize,
    /// Name of the department the list is filtered to.
    #[prop_or_default]
    pub department: Option<String>,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style = "min-width:40px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div class="stats" style="display:flex; flex-direction:column; gap:6px; font-size:14px;">
            <div style={row_style}>
                <span style={label_style}>{"Bancos"}</span>
                <span style={value_style}>{ props.bank_count }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Departamentos con cobertura"}</span>
                <span style={value_style}>{ format!("{} / {}", props.covered, props.total) }</span>
            </div>
            { if let Some(name) = &props.department {
                html!{ <div style="font-size:13px; color:#F58634;">{ format!("Departamento: {name}") }</div> }
            } else { html!{} } }
        </div>
    }
}
