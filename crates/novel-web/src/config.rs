use novel_core::NovelConfig;
use web_sys as web;

const OVERRIDES: [&str; 4] = ["max-scene", "dwell-ms", "end-delay-ms", "image-failure"];

/// Defaults, overlaid with `data-*` attributes on `<body>`.
pub fn read_config(document: &web::Document) -> NovelConfig {
    let mut config = NovelConfig::default();
    let Some(body) = document.body() else {
        return config;
    };
    for name in OVERRIDES {
        if let Some(value) = body.get_attribute(&format!("data-{name}")) {
            if config.apply_override(name, &value) {
                log::info!("[boot] config {name}={value}");
            } else {
                log::warn!("[boot] ignoring data-{name}=\"{value}\"");
            }
        }
    }
    config
}
