//! Widgets built on the shared [`Block`](crate::primitive::Block) base
//!
//! Every widget implements [`Primitive`](crate::primitive::Primitive) and
//! nothing more is needed to plug it into an application.

mod animation;
mod checkbox;
mod flex;
mod form_item;
mod input_field;
mod list;

pub use animation::{AnimationError, AnimationPlayer, DEFAULT_DELAY};
pub use checkbox::Checkbox;
pub use flex::Flex;
pub use form_item::{DoneFunc, FormItem};
pub use input_field::{accept_float, accept_integer, accept_max_length, AcceptFunc, InputField};
pub use list::{ItemFunc, List, ListItem};
