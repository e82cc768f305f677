//!
//! Page-to-page navigation: full-page redirects carrying simple query parameters.

use url::form_urlencoded;

use crate::types::Page;

/// A target page plus its query parameters, e.g. `detalle_mascota.html?id=12`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub page: Page,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(page: Page) -> Self {
        Location { page, query: Vec::new() }
    }

    /// Adds a query parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// First value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Renders the relative href, form-url-encoding the query.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.page.file_name().to_string();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.page.file_name(), query)
    }

    /// Parses an href produced by [`Location::href`] or written in the markup.
    ///
    /// Only the last path segment is looked at; fragments are dropped. Returns `None`
    /// for files that are not clinic pages.
    pub fn parse(href: &str) -> Option<Location> {
        let href = href.split('#').next().unwrap_or_default();
        let (path, query) = match href.split_once('?') {
            Some((path, query)) => (path, query),
            None => (href, ""),
        };
        let file = path.rsplit('/').next().unwrap_or_default();
        let page = Page::from_file_name(file)?;
        let query = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Some(Location { page, query })
    }
}

impl From<Page> for Location {
    fn from(page: Page) -> Self {
        Location::new(page)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.href())
    }
}

/// Performs full-page redirects.
pub trait Navigator {
    fn redirect(&self, to: &Location);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn redirect(&self, to: &Location) {
        (**self).redirect(to)
    }
}

/// Navigator that only records where it was asked to go.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: std::cell::RefCell<Vec<Location>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<Location> {
        self.visits.borrow().clone()
    }

    pub fn redirect_count(&self) -> usize {
        self.visits.borrow().len()
    }

    pub fn last(&self) -> Option<Location> {
        self.visits.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.visits.borrow_mut().clear();
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Navigator for RecordingNavigator {
    fn redirect(&self, to: &Location) {
        self.visits.borrow_mut().push(to.clone());
    }
}
