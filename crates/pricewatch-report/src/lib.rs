pub mod csv_export;
pub mod error;
pub mod reporter;
pub mod telegram;

pub use csv_export::{to_csv, REPORT_FILE_NAME};
pub use error::ReportError;
pub use reporter::Reporter;
pub use telegram::TelegramClient;
