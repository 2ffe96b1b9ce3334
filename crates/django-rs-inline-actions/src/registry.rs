//! Per-admin action registry.
//!
//! Capabilities are composed by registering [`ActionProvider`]s in order. Each
//! provider contributes action definitions, statically declared names, and
//! optionally names that depend on the row being rendered. Resolution keeps
//! registration order and drops duplicates, so defaults registered first come
//! first and later registrations append.
//!
//! ```
//! use django_rs_inline_actions::actions::ViewAction;
//! use django_rs_inline_actions::registry::{ActionRegistry, AllowAll, ResolveContext};
//! use django_rs_inline_actions_http::HttpRequest;
//!
//! let registry = ActionRegistry::new().with(ViewAction).declare("view_action");
//! let request = HttpRequest::builder().build();
//! let cx = ResolveContext::new(&request, &AllowAll);
//! assert_eq!(registry.resolve_actions(&cx, None), vec!["view_action"]);
//! ```

use std::fmt;
use std::sync::Arc;

use django_rs_inline_actions_http::HttpRequest;
use indexmap::{IndexMap, IndexSet};

use crate::action::InlineAction;
use crate::models::Row;

/// An ordered set of action names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionNames(IndexSet<String>);

impl ActionNames {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a name unless already present. Returns `true` if it was added.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Removes a name, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.shift_remove(name)
    }

    /// Returns `true` if the name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Iterates over the names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no names.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts into a vector, preserving order.
    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: Into<String>> Extend<S> for ActionNames {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for name in iter {
            self.push(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ActionNames {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut names = Self::new();
        names.extend(iter);
        names
    }
}

/// Permission checks delegated to the host.
///
/// Both checks allow by default.
pub trait PermissionPolicy: Send + Sync {
    /// Whether the user may change the row (or the model, for `None`).
    fn has_change_permission(&self, _request: &HttpRequest, _row: Option<&Row>) -> bool {
        true
    }

    /// Whether the user may delete the row (or rows of the model, for `None`).
    fn has_delete_permission(&self, _request: &HttpRequest, _row: Option<&Row>) -> bool {
        true
    }
}

/// A policy granting everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionPolicy for AllowAll {}

/// Request-scoped inputs of name resolution.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// The current request.
    pub request: &'a HttpRequest,
    /// The admin's permission policy.
    pub permissions: &'a dyn PermissionPolicy,
}

impl<'a> ResolveContext<'a> {
    /// Creates a resolution context.
    pub fn new(request: &'a HttpRequest, permissions: &'a dyn PermissionPolicy) -> Self {
        Self {
            request,
            permissions,
        }
    }
}

impl fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveContext")
            .field("path", &self.request.path())
            .finish_non_exhaustive()
    }
}

/// A reusable bundle of actions.
pub trait ActionProvider: Send + Sync {
    /// Definitions of the actions this provider implements.
    fn actions(&self) -> Vec<InlineAction>;

    /// Names offered for every row.
    fn declared(&self) -> Vec<String> {
        Vec::new()
    }

    /// Appends names that depend on the row or the request.
    fn contribute(&self, _cx: &ResolveContext<'_>, _row: Option<&Row>, _names: &mut ActionNames) {}
}

/// The actions of one admin or inline.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    providers: Vec<Arc<dyn ActionProvider>>,
    declared: ActionNames,
    definitions: IndexMap<String, InlineAction>,
    disabled: bool,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("providers", &self.providers.len())
            .field("declared", &self.declared)
            .field("definitions", &self.definitions.keys().collect::<Vec<_>>())
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl ActionRegistry {
    /// Creates an empty, enabled registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with actions disabled.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Registers a provider.
    #[must_use]
    pub fn with(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.register(provider);
        self
    }

    /// Declares a name offered for every row.
    #[must_use]
    pub fn declare(mut self, name: impl Into<String>) -> Self {
        self.declared.push(name);
        self
    }

    /// Defines an action. A later definition replaces an earlier one.
    #[must_use]
    pub fn define(mut self, action: InlineAction) -> Self {
        self.insert(action);
        self
    }

    /// Disables all actions. Nothing is rendered, not even the container.
    #[must_use]
    pub const fn disable(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Registers a provider in place.
    pub fn register(&mut self, provider: impl ActionProvider + 'static) {
        self.declared.extend(provider.declared());
        for action in provider.actions() {
            self.insert(action);
        }
        self.providers.push(Arc::new(provider));
    }

    fn insert(&mut self, action: InlineAction) {
        self.definitions.insert(action.name().to_string(), action);
    }

    /// Returns `true` if actions are disabled.
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Resolves the names offered for a row.
    ///
    /// Declared names come first, then each provider's contributions, all in
    /// registration order without duplicates. Disabled registries resolve to
    /// nothing.
    pub fn resolve_actions(&self, cx: &ResolveContext<'_>, row: Option<&Row>) -> Vec<String> {
        if self.disabled {
            return Vec::new();
        }
        let mut names = self.declared.clone();
        for provider in &self.providers {
            provider.contribute(cx, row, &mut names);
        }
        names.into_vec()
    }

    /// Returns the definition registered under a name.
    pub fn get(&self, name: &str) -> Option<&InlineAction> {
        self.definitions.get(name)
    }

    /// Returns the statically declared names.
    pub const fn declared(&self) -> &ActionNames {
        &self.declared
    }
}
