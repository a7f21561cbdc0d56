//! Action resolution
//!
//! Runs the same shrinking search as the locator over the parameters the
//! locator left behind. Each step tries the verb-specific name first, then the
//! catch-all name. The first action that exists decides the outcome: if it is
//! not public or cannot take the remaining parameters, resolution fails
//! instead of searching further.

use crate::config::{verb_prefix, RoutingConfig};
use crate::controller::{ActionDescriptor, ActionIntrospector};
use crate::errors::{DispatchError, DispatchResult};
use crate::routing::locator::HandlerDescriptor;
use crate::routing::naming::normalize;
use crate::routing::segments::{identifier_window, ParameterList};
use std::collections::HashMap;
use std::sync::Arc;

pub struct ActionResolver {
    introspector: Arc<dyn ActionIntrospector>,
    config: Arc<RoutingConfig>,
}

impl ActionResolver {
    pub fn new(introspector: Arc<dyn ActionIntrospector>, config: Arc<RoutingConfig>) -> Self {
        Self {
            introspector,
            config,
        }
    }

    /// Pick the action for `method` on `handler`
    ///
    /// `prefix_map` overrides the verb prefix per lowercased method.
    pub fn resolve(
        &self,
        handler: &HandlerDescriptor,
        segments: ParameterList,
        method: &str,
        prefix_map: &HashMap<String, String>,
    ) -> DispatchResult<(Arc<ActionDescriptor>, ParameterList)> {
        let prefix = verb_prefix(method, prefix_map);
        let window = if self.config.alphabetic_segments_only {
            identifier_window(&segments)
        } else {
            segments.len()
        };

        for end in (1..=window).rev() {
            let suffix = normalize(&segments[..end]);
            if let Some(action) = self.find(handler, &prefix, &suffix) {
                let parameters = ParameterList::from(&segments[end..]);
                return self.verify(handler, action, parameters);
            }
        }

        match self.find(handler, &prefix, &self.config.index_action) {
            Some(action) => self.verify(handler, action, segments),
            None => {
                tracing::debug!(
                    target: "waymark::routing",
                    "No {} action on {} for {} parameter(s)",
                    prefix,
                    handler.name,
                    segments.len()
                );
                Err(DispatchError::method_not_found())
            }
        }
    }

    fn find(
        &self,
        handler: &HandlerDescriptor,
        prefix: &str,
        suffix: &str,
    ) -> Option<Arc<ActionDescriptor>> {
        [prefix, self.config.catch_all_prefix.as_str()]
            .into_iter()
            .find_map(|candidate| {
                let name = format!("{}{}", candidate, suffix);
                tracing::trace!(target: "waymark::routing", "Trying action {}::{}", handler.name, name);
                self.introspector.describe(&handler.name, &name)
            })
    }

    fn verify(
        &self,
        handler: &HandlerDescriptor,
        action: Arc<ActionDescriptor>,
        parameters: ParameterList,
    ) -> DispatchResult<(Arc<ActionDescriptor>, ParameterList)> {
        if !action.is_invocable_with(parameters.len()) {
            tracing::debug!(
                target: "waymark::routing",
                "Action {}::{} cannot be invoked with {} parameter(s)",
                handler.name,
                action.name,
                parameters.len()
            );
            return Err(DispatchError::method_not_found());
        }

        tracing::debug!(
            target: "waymark::routing",
            "Resolved action {}::{} with {} parameter(s)",
            handler.name,
            action.name,
            parameters.len()
        );
        Ok((action, parameters))
    }
}
