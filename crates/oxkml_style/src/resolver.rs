//! Merging style selectors into a single style.
//!
//! Sources are merged in priority order, and the first source to provide a sub-style wins.
//! A feature's inline selectors are merged before the shared selector its `styleUrl`
//! references. For a style map, only the first pair keyed by the requested state is followed.
//! A shared selector reached along more than one path is only merged the first time.
use std::collections::HashSet;

use oxkml_ast::{
    document::Document,
    element::Element,
    view::{Capability, Feature, Style, StyleSelector, SUB_STYLES},
};
use oxkml_collections::{element::ElementId, value::StyleState};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A reference that didn't contribute to a resolved style
pub enum StyleDiagnostic {
    /// No object in the document has the referenced id
    #[error("`{url}` doesn't reference an object in the document")]
    Unresolved {
        /// The style url as written
        url: String,
    },
    /// The referenced object isn't a `<Style>` or `<StyleMap>`
    #[error("`{url}` references a `<{kind}>`, which isn't a style selector")]
    NotASelector {
        /// The style url as written
        url: String,
        /// The name of the referenced kind
        kind: &'static str,
    },
    /// The reference points outside of the document
    #[error("`{url}` references another document")]
    External {
        /// The style url as written
        url: String,
    },
    /// The reference leads back to a selector that's already being resolved
    #[error("`{url}` leads back to a style already being resolved")]
    Cycle {
        /// The style url as written
        url: String,
    },
}

/// Pending work while merging, popped in priority order
enum Task<'s> {
    Selector(StyleSelector<'s>),
    Url(&'s str),
    /// Marks the end of a shared selector's contribution
    Leave(&'s str),
}

/// Resolves styles against the shared selectors of a document.
///
/// References are followed with an explicit stack, so chains of any length resolve without
/// recursion. Each shared selector contributes at most once per resolution.
///
/// Diagnostics are kept for the most recent resolution.
pub struct StyleResolver<'a> {
    document: &'a Document,
    state: StyleState,
    diagnostics: Vec<StyleDiagnostic>,
}

impl<'a> StyleResolver<'a> {
    /// Creates a resolver for features in the given state
    pub fn new(document: &'a Document, state: StyleState) -> Self {
        Self {
            document,
            state,
            diagnostics: vec![],
        }
    }

    /// Returns the diagnostics from the most recent resolution
    pub fn diagnostics(&self) -> &[StyleDiagnostic] {
        &self.diagnostics
    }

    /// Returns the effective style of a feature.
    ///
    /// The result is always a `<Style>`, which is empty when the element isn't a feature
    /// or none of its references resolve.
    pub fn resolve(&mut self, feature: &Element) -> Element {
        self.diagnostics.clear();

        let mut resolved = Element::new(ElementId::Style);
        let Some(feature) = feature.view::<Feature>() else {
            return resolved;
        };

        let document = self.document;
        // Ids of the shared selectors between the feature and the current task
        let mut chain = HashSet::new();
        // Ids of every shared selector merged so far
        let mut merged = HashSet::new();
        let mut tasks = vec![];
        if let Some(url) = feature.style_url() {
            tasks.push(Task::Url(url));
        }
        let inline: Vec<_> = feature.style_selectors().collect();
        tasks.extend(inline.into_iter().rev().map(Task::Selector));

        while let Some(task) = tasks.pop() {
            match task {
                Task::Leave(id) => {
                    chain.remove(id);
                }
                Task::Selector(StyleSelector::Style(style)) => merge_style(&mut resolved, style),
                Task::Selector(StyleSelector::StyleMap(style_map)) => {
                    let Some(pair) = style_map.pair(self.state) else {
                        log::debug!(
                            "style map {:?} has no pair for {:?}",
                            style_map.element().object_id(),
                            self.state
                        );
                        continue;
                    };
                    if let Some(url) = pair.style_url() {
                        tasks.push(Task::Url(url));
                    }
                    if let Some(selector) = pair.style_selector() {
                        tasks.push(Task::Selector(selector));
                    }
                }
                Task::Url(url) => {
                    let Some(id) = url.trim().strip_prefix('#') else {
                        self.diagnose(StyleDiagnostic::External { url: url.into() });
                        continue;
                    };
                    if chain.contains(id) {
                        self.diagnose(StyleDiagnostic::Cycle { url: url.into() });
                        continue;
                    }
                    if merged.contains(id) {
                        log::debug!("{url} was already merged");
                        continue;
                    }
                    let Some(target) = document.lookup_by_id(id) else {
                        self.diagnose(StyleDiagnostic::Unresolved { url: url.into() });
                        continue;
                    };
                    let Some(selector) = target.view::<StyleSelector>() else {
                        self.diagnose(StyleDiagnostic::NotASelector {
                            url: url.into(),
                            kind: target.id().name(),
                        });
                        continue;
                    };
                    let Some(target_id) = target.object_id() else {
                        continue;
                    };

                    chain.insert(target_id);
                    merged.insert(target_id);
                    tasks.push(Task::Leave(target_id));
                    tasks.push(Task::Selector(selector));
                }
            }
        }
        resolved
    }

    fn diagnose(&mut self, diagnostic: StyleDiagnostic) {
        log::debug!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

fn merge_style(resolved: &mut Element, style: Style<'_>) {
    for id in SUB_STYLES {
        if resolved.find_child(id).is_some() {
            continue;
        }
        let Some(sub_style) = style.sub_style(id) else {
            continue;
        };
        if let Err(rejected) = resolved.add_child(sub_style.clone()) {
            log::warn!("{rejected}");
        }
    }
}

/// Returns the effective style of a feature in the given state.
///
/// See [`StyleResolver`] to inspect the references that didn't resolve.
pub fn resolve_style(feature: &Element, document: &Document, state: StyleState) -> Element {
    StyleResolver::new(document, state).resolve(feature)
}
