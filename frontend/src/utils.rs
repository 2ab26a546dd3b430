use crate::models::VideoId;
use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use web_sys::window;

pub fn current_origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn video_page_path(id: &VideoId) -> String {
    format!("/video/{}", urlencoding::encode(id.as_str()))
}

pub fn share_link(origin: &str, id: &VideoId) -> String {
    format!("{}{}", origin.trim_end_matches('/'), video_page_path(id))
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::error!("Failed to open {}: {:?}", url, e);
        }
    }
}

pub fn navigate_to(url: &str) {
    if let Some(window) = window() {
        if let Err(e) = window.location().set_href(url) {
            log::error!("Failed to navigate to {}: {:?}", url, e);
        }
    }
}

pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// `navigator.clipboard.writeText`, looked up dynamically since the Clipboard
/// API is missing on insecure origins.
pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = window().ok_or("No window")?;
    let clipboard = Reflect::get(&window.navigator(), &"clipboard".into())
        .map_err(|_| "Clipboard unavailable".to_string())?;
    if clipboard.is_undefined() {
        return Err("Clipboard unavailable".to_string());
    }
    let write_text: Function = Reflect::get(&clipboard, &"writeText".into())
        .map_err(|_| "Clipboard unavailable".to_string())?
        .dyn_into()
        .map_err(|_| "Clipboard unavailable".to_string())?;
    write_text
        .call1(&clipboard, &text.into())
        .map_err(|e| format!("Failed to copy: {:?}", e))?;
    Ok(())
}

// Formats each x1024 step
pub fn format_file_size(bytes: f64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes.max(0.0);
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", size as u64, UNITS[unit])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_link_points_at_player_page() {
        assert_eq!(
            share_link("https://clips.example.com/", &VideoId::from("12")),
            "https://clips.example.com/video/12"
        );
    }

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(512.0), "512 B");
        assert_eq!(format_file_size(1536.0), "1.5 KB");
        assert_eq!(format_file_size(25.0 * 1024.0 * 1024.0), "25.0 MB");
        assert_eq!(format_file_size(3.0 * 1024.0 * 1024.0 * 1024.0), "3.0 GB");
    }
}
