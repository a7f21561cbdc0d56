//! Handler location
//!
//! The longest leading run of segments that names a registered handler wins.
//! Segments are peeled off the end one at a time and become parameters; when
//! nothing is left the fallback handler gets the whole path as parameters.

use crate::config::RoutingConfig;
use crate::controller::HandlerRegistry;
use crate::errors::{DispatchError, DispatchResult};
use crate::routing::naming::normalize;
use crate::routing::segments::{identifier_window, ParameterList, PathSegments};
use std::sync::Arc;

/// A located handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerDescriptor {
    /// Fully-qualified handler name
    pub name: String,
    /// Normalized identifier the name was built from
    pub identifier: String,
    /// Number of leading segments consumed by the name
    pub matched: usize,
    /// Whether this is the fallback handler
    pub fallback: bool,
}

pub struct HandlerLocator {
    registry: Arc<dyn HandlerRegistry>,
    config: Arc<RoutingConfig>,
}

impl HandlerLocator {
    pub fn new(registry: Arc<dyn HandlerRegistry>, config: Arc<RoutingConfig>) -> Self {
        Self { registry, config }
    }

    /// Find the handler for a segment sequence
    ///
    /// Returns the handler and the segments it did not consume. The matched
    /// prefix length plus the parameter count always equals the segment count.
    pub fn locate(
        &self,
        segments: &PathSegments,
    ) -> DispatchResult<(HandlerDescriptor, ParameterList)> {
        let window = if self.config.alphabetic_segments_only {
            identifier_window(segments)
        } else {
            segments.len()
        };

        for end in (1..=window).rev() {
            let identifier = normalize(&segments[..end]);
            let name = self.config.handler_name(&identifier);
            tracing::trace!(target: "waymark::routing", "Trying handler {}", name);

            if self.registry.exists(&name) {
                tracing::debug!(
                    target: "waymark::routing",
                    "Located handler {} ({} segment(s) matched)",
                    name,
                    end
                );
                return Ok((
                    HandlerDescriptor {
                        name,
                        identifier,
                        matched: end,
                        fallback: false,
                    },
                    ParameterList::from(&segments[end..]),
                ));
            }
        }

        let name = self.config.fallback_handler_name();
        if self.registry.exists(&name) {
            tracing::debug!(target: "waymark::routing", "Falling back to handler {}", name);
            return Ok((
                HandlerDescriptor {
                    name,
                    identifier: self.config.fallback_handler.clone(),
                    matched: 0,
                    fallback: true,
                },
                ParameterList::from(&segments[..]),
            ));
        }

        tracing::debug!(
            target: "waymark::routing",
            "No handler for {} segment(s) and no fallback {}",
            segments.len(),
            name
        );
        Err(DispatchError::handler_not_found())
    }
}
