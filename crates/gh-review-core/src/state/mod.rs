//! State management for the review screen.

mod editor;
mod mode;
mod navigation;

pub use editor::TextEditor;
pub use mode::{
    AnnotationForm, CommentForm, InputMode, InteractionMode, ReviewForm, SuggestionField,
    SuggestionForm,
};
pub use navigation::{LineSelection, NavIntent, SelectionState, Viewport};
