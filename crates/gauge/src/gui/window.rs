use crate::config::WindowConfig;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn init_window(window: &gtk::ApplicationWindow, config: &WindowConfig) {
    window.set_title(Some(&config.title));
    window.set_default_size(config.width, config.height);
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.gauge-window, .gauge-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
