use crate::model::BankRecord;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct InfoPanelProps {
    pub bank: Option<BankRecord>,
}

/// Always rendered so the DOM ids exist; hidden via the `hidden` class.
#[function_component]
pub fn InfoPanel(props: &InfoPanelProps) -> Html {
    let class = classes!("info-panel", props.bank.is_none().then_some("hidden"));
    let (name, address, department) = match &props.bank {
        Some(b) => (
            b.bank_name.clone(),
            b.address.clone(),
            b.department_name.clone(),
        ),
        None => Default::default(),
    };
    html! {
        <div id="info-panel" {class}>
            <h2 id="info-bank-name">{ name }</h2>
            <div class="info-row">
                <span class="info-label">{"Dirección"}</span>
                <span id="info-bank-address">{ address }</span>
            </div>
            <div class="info-row">
                <span class="info-label">{"Departamento"}</span>
                <span id="info-dept-name">{ department }</span>
            </div>
        </div>
    }
}
