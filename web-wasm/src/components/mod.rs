pub mod header;
pub mod loading_skeleton;
pub mod notice;
pub mod prediction_result;
pub mod settings_panel;
pub mod upload_area;
