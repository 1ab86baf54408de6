use datastar::prelude::ElementPatchMode;

use crate::{
    application::{error::HttpError, stream::StreamBuilder},
    domain::resources::Resource,
};

pub(super) fn datastar_replace(selector: &str, html: String) -> StreamBuilder {
    let mut stream = StreamBuilder::new();
    stream.push_patch(html, selector, ElementPatchMode::Replace);
    stream
}

pub(super) fn resolve_resource(slug: &str) -> Result<Resource, HttpError> {
    slug.parse::<Resource>().map_err(HttpError::from)
}
