pub mod dropbox;
pub mod gdrive;
mod http;
mod local;
mod page;
#[cfg(test)]
mod test_server;

pub use dropbox::{DropboxClient, DropboxEntry};
pub use gdrive::DriveClient;
pub use http::build_client;
pub use local::list_directory;
pub use page::{collect_pages, collect_pages_with, Page, PageSource};
