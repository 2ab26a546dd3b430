use lazy_static::lazy_static;
use web_sys::window;

lazy_static! {
    pub static ref API_URL: String = get_api_url();
    pub static ref LOGIN_URL: String = get_login_url();
    pub static ref LOGOUT_URL: String = get_logout_url();
}

pub fn get_env_var(key: &str) -> Option<String> {
    let window = window()?;

    // Injected by index.html before the wasm bundle loads
    let env_config = js_sys::Reflect::get(&window, &"ENV_CONFIG".into()).ok()?;

    if env_config.is_undefined() {
        log::warn!("ENV_CONFIG is undefined - environment variables not loaded");
        return None;
    }

    let value = js_sys::Reflect::get(&env_config, &key.into()).ok()?;

    if !value.is_undefined() {
        value.as_string().filter(|v| !v.is_empty())
    } else {
        log::warn!("Environment variable '{}' is undefined", key);
        None
    }
}

pub fn get_api_url() -> String {
    get_env_var("API_URL").unwrap_or_else(|| "http://localhost:8080".to_string())
}

pub fn get_app_name() -> String {
    get_env_var("APP_NAME").unwrap_or_else(|| "ClipShare".to_string())
}

pub fn get_login_url() -> String {
    get_env_var("LOGIN_URL").unwrap_or_else(|| "http://localhost:8180/login".to_string())
}

pub fn get_logout_url() -> String {
    get_env_var("LOGOUT_URL").unwrap_or_else(|| "http://localhost:8180/logout".to_string())
}

pub fn is_debug_mode() -> bool {
    get_env_var("DEBUG_MODE")
        .unwrap_or_else(|| "false".to_string())
        .parse()
        .unwrap_or(false)
}
