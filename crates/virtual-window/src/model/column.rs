//! Column configuration.
//!
//! A [`Column`] is a configured way to get two things out of an opaque row:
//! a renderable [`DisplayValue`] and an orderable [`SortKey`]. Both accessors
//! are plain functions chosen at setup time, so the store never inspects a
//! row's structure at runtime.
//!
//! Rows that support positional access (tuples, arrays, `Vec`s of scalar
//! values) implement [`PositionalRow`] and can use [`Column::at`], which reads
//! both the text and the key from a field position.
//!
//! # Example
//!
//! ```
//! use virtual_window::{Column, DisplayValue, SortOrder};
//!
//! struct Employee {
//!     name: String,
//!     salary: u32,
//! }
//!
//! let columns: Vec<Column<Employee>> = vec![
//!     Column::new("Name")
//!         .with_text(|e: &Employee| e.name.clone())
//!         .with_key(|e: &Employee| e.name.to_lowercase()),
//!     Column::new("Salary")
//!         .with_text(|e: &Employee| e.salary)
//!         .with_key(|e: &Employee| e.salary)
//!         .with_first_direction(SortOrder::Descending),
//! ];
//! assert_eq!(columns[1].heading(), "Salary");
//! ```

use std::fmt;
use std::sync::Arc;

use super::value::{Alignment, DisplayValue, ImageIndex, SortKey, SortOrder};

/// Type alias for a display text extractor.
pub type TextExtractor<R> = Arc<dyn Fn(&R) -> DisplayValue + Send + Sync>;

/// Type alias for a sort key extractor.
pub type KeyExtractor<R> = Arc<dyn Fn(&R) -> SortKey + Send + Sync>;

const DEFAULT_WIDTH: u32 = 100;

/// Rows whose fields can be addressed by position.
pub trait PositionalRow {
    /// Returns the value of the field at `position`, or `None` if the row
    /// has no such field.
    fn field(&self, position: usize) -> Option<DisplayValue>;
}

macro_rules! tuple_row {
    ($($idx:tt $name:ident),+) => {
        impl<$($name: Clone + Into<DisplayValue>),+> PositionalRow for ($($name,)+) {
            fn field(&self, position: usize) -> Option<DisplayValue> {
                match position {
                    $($idx => Some(self.$idx.clone().into()),)+
                    _ => None,
                }
            }
        }
    };
}

tuple_row!(0 A);
tuple_row!(0 A, 1 B);
tuple_row!(0 A, 1 B, 2 C);
tuple_row!(0 A, 1 B, 2 C, 3 D);
tuple_row!(0 A, 1 B, 2 C, 3 D, 4 E);
tuple_row!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);

impl<T: Clone + Into<DisplayValue>> PositionalRow for Vec<T> {
    fn field(&self, position: usize) -> Option<DisplayValue> {
        self.get(position).cloned().map(Into::into)
    }
}

impl<T: Clone + Into<DisplayValue>, const N: usize> PositionalRow for [T; N] {
    fn field(&self, position: usize) -> Option<DisplayValue> {
        self.get(position).cloned().map(Into::into)
    }
}

/// A column of a data window.
///
/// Presentation metadata (`heading`, `alignment`, `width`, `image_index`,
/// visibility) is carried for the display's benefit; the store itself only
/// uses the extractors and `first_direction`.
pub struct Column<R> {
    heading: String,
    alignment: Alignment,
    width: u32,
    image_index: ImageIndex,
    first_direction: SortOrder,
    visible: bool,
    text: Option<TextExtractor<R>>,
    key: Option<KeyExtractor<R>>,
}

impl<R: 'static> Column<R> {
    /// Creates a column with the given heading and no extractors.
    ///
    /// Both [`with_text`](Self::with_text) and [`with_key`](Self::with_key)
    /// must be supplied before the column is handed to a row store.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            alignment: Alignment::default(),
            width: DEFAULT_WIDTH,
            image_index: ImageIndex::NONE,
            first_direction: SortOrder::Ascending,
            visible: true,
            text: None,
            key: None,
        }
    }

    /// Creates a column that reads the field at `position` for both its
    /// display text and its sort key.
    pub fn at(heading: impl Into<String>, position: usize) -> Self
    where
        R: PositionalRow,
    {
        Self::new(heading)
            .with_text(move |row: &R| row.field(position).unwrap_or_default())
            .with_key(move |row: &R| SortKey::from(row.field(position).unwrap_or_default()))
    }

    /// Sets the display text extractor.
    pub fn with_text<F, V>(mut self, extractor: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
        V: Into<DisplayValue>,
    {
        self.text = Some(Arc::new(move |row: &R| -> DisplayValue { extractor(row).into() }));
        self
    }

    /// Sets the sort key extractor.
    pub fn with_key<F, K>(mut self, extractor: F) -> Self
    where
        F: Fn(&R) -> K + Send + Sync + 'static,
        K: Into<SortKey>,
    {
        self.key = Some(Arc::new(move |row: &R| -> SortKey { extractor(row).into() }));
        self
    }

    /// Sets the display width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Sets the text alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the header image.
    pub fn with_image(mut self, image_index: ImageIndex) -> Self {
        self.image_index = image_index;
        self
    }

    /// Sets the direction used the first time this column is sorted.
    pub fn with_first_direction(mut self, order: SortOrder) -> Self {
        self.first_direction = order;
        self
    }

    /// Marks the column as initially hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl<R> Column<R> {
    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn image_index(&self) -> ImageIndex {
        self.image_index
    }

    pub fn first_direction(&self) -> SortOrder {
        self.first_direction
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the column. Hidden columns keep their index.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Name of the first accessor this column is missing, if any.
    pub(crate) fn missing_accessor(&self) -> Option<&'static str> {
        if self.text.is_none() {
            Some("text")
        } else if self.key.is_none() {
            Some("sort key")
        } else {
            None
        }
    }

    pub(crate) fn display(&self, row: &R) -> DisplayValue {
        self.text
            .as_ref()
            .map_or(DisplayValue::None, |extract| extract(row))
    }

    pub(crate) fn sort_key(&self, row: &R) -> SortKey {
        self.key.as_ref().map_or(SortKey::None, |extract| extract(row))
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            heading: self.heading.clone(),
            alignment: self.alignment,
            width: self.width,
            image_index: self.image_index,
            first_direction: self.first_direction,
            visible: self.visible,
            text: self.text.clone(),
            key: self.key.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("heading", &self.heading)
            .field("alignment", &self.alignment)
            .field("width", &self.width)
            .field("first_direction", &self.first_direction)
            .field("visible", &self.visible)
            .field("has_text", &self.text.is_some())
            .field("has_key", &self.key.is_some())
            .finish()
    }
}

/// Builds one positional column per heading, reading field `i` for the
/// `i`-th heading.
pub fn positional_columns<R, I, S>(headings: I) -> Vec<Column<R>>
where
    R: PositionalRow + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    headings
        .into_iter()
        .enumerate()
        .map(|(position, heading)| Column::at(heading, position))
        .collect()
}
