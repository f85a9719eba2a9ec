pub mod app;
pub mod bank_list;
pub mod home_control;
pub mod info_panel;
pub mod legend;
pub mod legend_panel;
pub mod map_view;
pub mod stats_panel;
