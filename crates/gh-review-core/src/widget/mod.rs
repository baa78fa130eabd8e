//! Ratatui widgets for the review screen.

mod annotation_form;
mod diff_content;
mod file_list;
mod review_popup;
mod review_screen;
mod thread_pane;

pub use annotation_form::AnnotationFormWidget;
pub use diff_content::{DiffContentWidget, FooterHint};
pub use file_list::FileListWidget;
pub use review_popup::ReviewPopupWidget;
pub use review_screen::ReviewScreen;
pub use thread_pane::ThreadPaneWidget;
