use std::rc::Rc;

use super::{
    bank_list::BankList, info_panel::InfoPanel, legend_panel::LegendPanel, map_view::MapView,
    stats_panel::StatsPanel,
};
use crate::config::{SharedConfig, ViewerConfig};
use crate::loader::load_dataset;
use crate::model::{AppAction, AppState, BankId};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config: SharedConfig = use_memo((), |_| ViewerConfig::default());
    let state = use_reducer(AppState::default);

    // Fetch both resources once; failures are logged and leave the view empty
    {
        let state = state.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match load_dataset(&config.sources).await {
                    Ok(data) => state.dispatch(AppAction::Loaded(Rc::new(data))),
                    Err(err) => {
                        log::error!("Error loading data: {err}");
                        state.dispatch(AppAction::LoadFailed);
                    }
                }
            });
            || ()
        });
    }

    let on_select_bank = {
        let state = state.clone();
        Callback::from(move |id: BankId| state.dispatch(AppAction::SelectBank(id)))
    };
    let on_home = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(AppAction::Home))
    };

    let sidebar = match state.data.clone() {
        Some(data) => {
            let covered = data.covered_department_count();
            let total = data.departments.len();
            let department = state
                .selection
                .filtered_department()
                .and_then(|id| data.departments.get(id))
                .and_then(|f| f.name.clone());
            html! { <>
                <StatsPanel bank_count={data.banks.len()} {covered} {total} {department} />
                <LegendPanel covered={Some(covered)} uncovered={Some(total - covered)} />
                <BankList
                    data={data.clone()}
                    view={state.selection.list_view(&data)}
                    active={state.selection.active_bank()}
                    on_select={on_select_bank}
                />
                <InfoPanel bank={state.selection.info_bank(&data).cloned()} />
            </> }
        }
        None => html! { <>
            <LegendPanel covered={None} uncovered={None} />
            <div id="bank-list"></div>
            <InfoPanel bank={None} />
        </> },
    };

    html! {
        <ContextProvider<SharedConfig> context={config}>
            <div id="layout" style="display:flex; width:100vw; height:100vh;">
                <aside id="sidebar" style="width:340px; overflow-y:auto; padding:12px; box-sizing:border-box;">
                    <h1 style="font-size:18px; margin:0 0 10px 0;">{"Cobertura de bancos aliados"}</h1>
                    { sidebar }
                </aside>
                <MapView state={state.clone()} {on_home} />
            </div>
        </ContextProvider<SharedConfig>>
    }
}
