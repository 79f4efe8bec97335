pub mod carousel_widget;
pub mod viewer;
