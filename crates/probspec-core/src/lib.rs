pub mod catalog;
pub mod diagnostics;
pub mod document;
pub mod interface;
pub mod name;
pub mod problem;
pub mod types;
pub mod util;
pub mod wire;

pub use document::{Document, Inline, RenderError};
pub use interface::{
    Binding, BindingHandle, BindingKind, Bindings, BuildError, BuildErrorKind, Interface,
    InterfaceBuilder,
};
pub use name::Name;
pub use problem::{make_problem, Prize, Problem, ProblemContext, Stage};
pub use types::{render, Length, Ty};
