//! Request domain types

mod draft;
mod method;
mod pair;
mod resolved;
mod template;

pub use draft::RequestDraft;
pub use method::{HttpMethod, MethodColor};
pub use pair::{KeyValueList, KeyValuePair};
pub use resolved::ResolvedRequest;
pub use template::{
    RequestTemplate, body_text_from_json, body_text_from_stored, parse_body, pretty_json,
};
