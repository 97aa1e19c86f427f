//! Paged collections returned by the Miro API.

use serde::Serialize;

use crate::decode::{set_entities, Decode, Field};

/// A page of results.
///
/// Miro reports the window it returned (`offset`, `limit`, `size`) and links
/// to the neighbouring pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound = "T: Serialize", rename_all = "camelCase")]
pub struct Page<T> {
    /// Maximum number of items the server was asked for.
    pub limit: i64,
    /// Index of the first item on this page.
    pub offset: i64,
    /// Number of items on this page as reported by the server.
    pub size: i64,
    pub next_link: String,
    pub prev_link: String,
    /// The items on this page.
    pub data: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            limit: 0,
            offset: 0,
            size: 0,
            next_link: String::new(),
            prev_link: String::new(),
            data: Vec::new(),
        }
    }
}

impl<T: Decode> Decode for Page<T> {
    const ENTITY: &'static str = "page";
    const FIELDS: &'static [Field<Self>] = &[
        Field::integer("limit", |p| &mut p.limit),
        Field::integer("offset", |p| &mut p.offset),
        Field::integer("size", |p| &mut p.size),
        Field::string("nextlink", |p| &mut p.next_link),
        Field::string("prevlink", |p| &mut p.prev_link),
        Field::entities("data", |p, items| set_entities(&mut p.data, items)),
    ];
}

impl<T> Page<T> {
    /// Whether the server linked a following page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.next_link.is_empty()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            limit: self.limit,
            offset: self.offset,
            size: self.size,
            next_link: self.next_link,
            prev_link: self.prev_link,
            data: self.data.into_iter().map(f).collect(),
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of decoded items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
