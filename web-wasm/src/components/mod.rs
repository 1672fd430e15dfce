pub mod action_buttons;
pub mod camera_capture;
pub mod header;
pub mod loading_indicator;
pub mod result_view;
pub mod settings_panel;
pub mod upload_area;
