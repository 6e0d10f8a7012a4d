pub mod app;
pub mod view;
pub mod window;
