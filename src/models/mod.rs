//! Typed representations of the board export's widget records.

pub mod common;
pub mod frame;
pub mod image;
pub mod style;
pub mod text;
pub mod widget;

pub use common::{BoundingBox, CoordinateSchema, Position, Rotation, Scale, Size};
pub use frame::{Container, Frame};
pub use image::{ImageCrop, ImageResource, ImageWidget};
pub use style::{Alignment, Style};
pub use text::TextWidget;
pub use widget::{Widget, WidgetBody, WidgetKind};
