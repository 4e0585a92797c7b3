//! Page components.

pub mod site_background;
