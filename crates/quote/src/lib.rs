//! Quote form controller: field validation, submission state and toast notifications.

mod config;
mod error;
pub mod input;
mod notification;
mod phone;
mod request;
mod submission;
mod transport;
mod validation;

pub use config::*;
pub use error::*;
pub use input::{FieldValue, FormInput};
pub use notification::*;
pub use phone::*;
pub use request::*;
pub use submission::*;
pub use transport::*;
pub use validation::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod http;

        pub use http::*;
    }
}
