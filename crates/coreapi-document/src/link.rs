//! Links: callable action descriptors embedded in documents

use std::fmt::{self, Display, Formatter};

/// Action used when a link does not declare one
pub const DEFAULT_ACTION: &str = "get";

/// Actions whose result replaces the originating node when `inplace` is unset
const INPLACE_ACTIONS: &[&str] = &[
    "put",
    "patch",
    "delete",
    "update",
    "partial_update",
    "destroy",
    "remove",
];

/// Where a field's value is placed in the outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLocation {
    /// Expanded into a `{name}` URL template placeholder
    Path,
    /// Appended to the query string
    Query,
    /// One member of the request body
    Form,
    /// The entire request body
    Body,
}

impl FieldLocation {
    /// Wire name of the location
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Form => "form",
            Self::Body => "body",
        }
    }

    /// Parse a wire name; unknown names yield `None`
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "form" => Some(Self::Form),
            "body" => Some(Self::Body),
            _ => None,
        }
    }
}

impl Display for FieldLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter descriptor declared by a link
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Parameter name
    pub name: String,
    /// Whether callers must supply it
    pub required: bool,
    /// Request placement; `None` lets the transport decide
    pub location: Option<FieldLocation>,
}

impl Field {
    /// Optional field with no declared location
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            location: None,
        }
    }

    /// Mark as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// With request placement
    #[inline]
    #[must_use]
    pub fn with_location(mut self, location: FieldLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Callable action descriptor
///
/// A link never changes after construction. Applying call-time overrides
/// produces a new link (see [`Link::with_overrides`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    url: String,
    action: String,
    inplace: Option<bool>,
    fields: Vec<Field>,
}

impl Link {
    /// Link to `url` using the default `get` action
    #[inline]
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            action: DEFAULT_ACTION.to_string(),
            inplace: None,
            fields: Vec::new(),
        }
    }

    /// With action verb
    #[inline]
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// With explicit in-place hint
    #[inline]
    #[must_use]
    pub fn with_inplace(mut self, inplace: bool) -> Self {
        self.inplace = Some(inplace);
        self
    }

    /// With field schema
    #[inline]
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Declared in-place hint, if any
    #[inline]
    #[must_use]
    pub fn inplace(&self) -> Option<bool> {
        self.inplace
    }

    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a declared field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Effective in-place behaviour
    ///
    /// The declared hint wins. Without one, replacing actions (`put`,
    /// `patch`, `delete` and their aliases) are in place and everything else
    /// is navigation.
    #[must_use]
    pub fn is_inplace(&self) -> bool {
        self.inplace.unwrap_or_else(|| {
            INPLACE_ACTIONS
                .iter()
                .any(|a| a.eq_ignore_ascii_case(&self.action))
        })
    }

    /// Merge call-time overrides into a new link
    ///
    /// Each override that is `None` falls back to this link's own value;
    /// `url` and `fields` are always kept.
    #[must_use]
    pub fn with_overrides(&self, action: Option<&str>, inplace: Option<bool>) -> Self {
        Self {
            url: self.url.clone(),
            action: action.map_or_else(|| self.action.clone(), str::to_string),
            inplace: inplace.or(self.inplace),
            fields: self.fields.clone(),
        }
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::new("")
    }
}
