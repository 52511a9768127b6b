pub mod constants;
pub mod mime;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{is_data_uri, local_path, resolve_url};
