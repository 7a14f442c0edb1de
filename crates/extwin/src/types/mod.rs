/*! Public types for the extension windows API.

Regenerate TypeScript types: `cargo test -p extwin export_bindings`
*/

#![allow(missing_docs)]

mod error;
mod event;
mod geometry;
mod ids;
mod menu;
mod patch;
mod properties;
mod window;

pub use error::{AggregateFailure, WindowError, WindowResult};
pub use event::{ChangeOrigin, EventDetails, EventKind, MenuClicked, WindowEvent};
pub use geometry::{Bounds, Insets, PartialBounds, Point, Size, SizeLimit};
pub use ids::{ExtensionId, MenuItemId, NativeHandle, WindowId, WindowIds};
pub use menu::{MenuItem, MenuItemType, MenuRole};
pub use patch::WindowPatch;
pub use properties::{WindowProperties, WindowUpdate};
pub use window::{TitleBarStyle, Window, WindowAttributes, WindowFilter, WindowFlags, WindowRef};
