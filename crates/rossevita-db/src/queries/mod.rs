mod attachments;

pub use attachments::RECENT_ROW_LIMIT;
