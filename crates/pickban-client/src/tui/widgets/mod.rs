// TUI widget modules for each dashboard panel.

pub mod bans;
pub mod dialog;
pub mod join_form;
pub mod phase_banner;
pub mod player_panel;
pub mod ready_check;
pub mod roster_grid;
pub mod status_bar;
pub mod summary;
