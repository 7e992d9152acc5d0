pub mod geo;
pub mod notification;
pub mod render;
pub mod speech;

pub use geo::{Coordinates, GeoFuture, GeoPort};
pub use notification::{NotificationFuture, NotificationPort, Severity};
pub use render::{RenderFuture, RenderPort};
pub use speech::{SpeechFuture, SpeechPort, Transcript};
