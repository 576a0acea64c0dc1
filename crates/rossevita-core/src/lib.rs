pub mod attachment;
pub mod employee;
pub mod error;
pub mod event;
pub mod supplier;
pub mod supply;
pub mod venue;

pub use attachment::{AttachmentRecord, AttachmentRow, CachedUpload, StorageObject};
pub use employee::Employee;
pub use error::CoreError;
pub use event::Event;
pub use supplier::Supplier;
pub use supply::Supply;
pub use venue::{TaskStatus, VenueTask};
