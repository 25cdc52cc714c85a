//! Media source resolution.

use std::fmt;
use std::sync::Arc;

use crate::listeners::{SourceEventListener, SourceLoadListener};
use crate::models::ContentType;

/// What an engine session prepares: content type, locator and the
/// source-level listener bridges.
#[derive(Clone)]
pub struct SourceDescription {
    pub content_type: ContentType,
    pub locator: String,
    pub load_listener: Arc<dyn SourceLoadListener>,
    pub event_listener: Arc<dyn SourceEventListener>,
}

impl fmt::Debug for SourceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceDescription")
            .field("content_type", &self.content_type)
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

/// Turns a content type and locator into something the engine can prepare.
pub trait MediaSourceResolver: Send + Sync {
    fn resolve(
        &self,
        content_type: ContentType,
        locator: &str,
        load_listener: Arc<dyn SourceLoadListener>,
        event_listener: Arc<dyn SourceEventListener>,
    ) -> SourceDescription;
}

/// Resolver that passes locator and content type straight through.
///
/// Surrounding whitespace in the locator is trimmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSourceResolver;

impl MediaSourceResolver for DefaultSourceResolver {
    fn resolve(
        &self,
        content_type: ContentType,
        locator: &str,
        load_listener: Arc<dyn SourceLoadListener>,
        event_listener: Arc<dyn SourceEventListener>,
    ) -> SourceDescription {
        SourceDescription {
            content_type,
            locator: locator.trim().to_string(),
            load_listener,
            event_listener,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::SilentListener;

    #[test]
    fn default_resolver_keeps_type_and_trims_locator() {
        let silent = Arc::new(SilentListener);
        let source = DefaultSourceResolver.resolve(
            ContentType::Dash,
            "  https://cdn.example.com/vod/manifest.mpd \n",
            silent.clone(),
            silent,
        );
        assert_eq!(source.content_type, ContentType::Dash);
        assert_eq!(source.locator, "https://cdn.example.com/vod/manifest.mpd");
        assert!(format!("{:?}", source).contains("manifest.mpd"));
    }
}
