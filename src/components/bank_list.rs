use std::rc::Rc;

use crate::config::SharedConfig;
use crate::model::{BankId, Dataset};
use crate::state::ListView;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BankListProps {
    pub data: Rc<Dataset>,
    pub view: ListView,
    pub active: Option<BankId>,
    pub on_select: Callback<BankId>,
}

#[function_component]
pub fn BankList(props: &BankListProps) -> Html {
    let config = use_context::<SharedConfig>().unwrap_or_default();
    let content = match &props.view {
        ListView::Empty => html! {
            <div class="empty-message" style="padding:1rem; color:#666;">{ config.empty_department_message }</div>
        },
        ListView::Banks(ids) => ids
            .iter()
            .filter_map(|id| props.data.banks.get(*id).map(|bank| (*id, bank)))
            .map(|(id, bank)| {
                let onclick = {
                    let cb = props.on_select.clone();
                    Callback::from(move |_| cb.emit(id))
                };
                let class = classes!("bank-item", (props.active == Some(id)).then_some("active"));
                html! {
                    <div key={id.0} {class} {onclick}>
                        <h3>{ bank.bank_name.clone() }</h3>
                        <span class="dept-tag">{ bank.department_name.clone() }</span>
                    </div>
                }
            })
            .collect::<Html>(),
    };
    html! { <div id="bank-list">{ content }</div> }
}
