use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HomeControlProps {
    pub on_home: Callback<()>,
}

/// "Vista Inicial" button pinned under Leaflet's zoom buttons.
#[function_component(HomeControl)]
pub fn home_control(props: &HomeControlProps) -> Html {
    let onclick = {
        let cb = props.on_home.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(())
        })
    };
    html! {<div class="leaflet-bar leaflet-control" style="position:absolute; top:80px; left:10px; z-index:1000;">
        <a href="#" role="button" title="Vista Inicial" class="leaflet-control-home" {onclick}
            style="background-color:white; width:30px; height:30px; line-height:30px; text-align:center; cursor:pointer; display:block; text-decoration:none; font-size:18px;">
            {"🏠"}
        </a>
    </div>}
}
