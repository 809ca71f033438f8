pub mod record;
pub mod window;

pub use record::CovidRecord;
pub use window::DateWindow;
