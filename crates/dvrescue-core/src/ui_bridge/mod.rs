//! # dvrescue Core UI Bridge
//!
//! The UI engine and its inputs. A UI description (JSON, see
//! [`UiDescription`]) imports modules from the capability registry and
//! declares a tree of objects; [`UiEngine`] resolves and constructs it on the
//! main loop, then reports the outcome with [`ObjectCreated`].
pub mod description;
pub mod engine;
pub mod error;
pub mod object;

pub use description::{ImportDecl, ObjectDecl, ResourceBundle, UiDescription};
pub use engine::{EngineHandle, ObjectCreated, ObjectTree, UiEngine, BUILTIN_MODULE, WINDOW_TYPE};
pub use error::UiBridgeError;
pub use object::{downcast_object, ObjectRef, PropertyObject, UiObject};
