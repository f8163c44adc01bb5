//! Values exchanged between a row store and its display.
//!
//! A display asks for three things about a row: what text to draw in each
//! column ([`DisplayValue`]), which image to show ([`ImageIndex`]) and how
//! to draw the row itself ([`ItemState`]). Sorting goes through a separate,
//! totally ordered [`SortKey`].

use std::cmp::Ordering;
use std::fmt;

/// A renderable cell value.
///
/// # Example
///
/// ```
/// use virtual_window::DisplayValue;
///
/// assert_eq!(DisplayValue::from("abc").to_string(), "abc");
/// assert_eq!(DisplayValue::from(42).to_string(), "42");
/// assert_eq!(DisplayValue::None.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayValue {
    /// No data; renders as an empty cell.
    #[default]
    None,
    /// Text data.
    Text(String),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data.
    Bool(bool),
}

impl DisplayValue {
    /// Returns `true` if this is `DisplayValue::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, DisplayValue::None)
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DisplayValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int` value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DisplayValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a `Float` value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DisplayValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DisplayValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::None => Ok(()),
            DisplayValue::Text(s) => f.write_str(s),
            DisplayValue::Int(n) => write!(f, "{n}"),
            DisplayValue::Float(n) => write!(f, "{n}"),
            DisplayValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(s: &str) -> Self {
        DisplayValue::Text(s.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(s: String) -> Self {
        DisplayValue::Text(s)
    }
}

impl From<&String> for DisplayValue {
    fn from(s: &String) -> Self {
        DisplayValue::Text(s.clone())
    }
}

impl From<char> for DisplayValue {
    fn from(c: char) -> Self {
        DisplayValue::Text(c.to_string())
    }
}

macro_rules! display_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DisplayValue {
                fn from(n: $t) -> Self {
                    DisplayValue::Int(i64::from(n))
                }
            }
        )*
    };
}

display_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! display_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DisplayValue {
                fn from(n: $t) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => DisplayValue::Int(n),
                        Err(_) => DisplayValue::Float(n as f64),
                    }
                }
            }
        )*
    };
}

display_from_wide_int!(u64, usize, isize);

impl From<f64> for DisplayValue {
    fn from(n: f64) -> Self {
        DisplayValue::Float(n)
    }
}

impl From<f32> for DisplayValue {
    fn from(n: f32) -> Self {
        DisplayValue::Float(f64::from(n))
    }
}

impl From<bool> for DisplayValue {
    fn from(b: bool) -> Self {
        DisplayValue::Bool(b)
    }
}

impl<T: Into<DisplayValue>> From<Option<T>> for DisplayValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DisplayValue::None, Into::into)
    }
}

/// A totally ordered sort key.
///
/// Keys of different kinds order as `None < Bool < number < Text`. Integers
/// and floats compare numerically against each other, and NaN sorts after
/// every other number.
#[derive(Debug, Clone, Default)]
pub enum SortKey {
    /// Missing value; sorts first.
    #[default]
    None,
    /// Boolean key.
    Bool(bool),
    /// Integer key.
    Int(i64),
    /// Floating point key.
    Float(f64),
    /// Text key, compared lexicographically by code point.
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::None => 0,
            SortKey::Bool(_) => 1,
            SortKey::Int(_) | SortKey::Float(_) => 2,
            SortKey::Text(_) => 3,
        }
    }
}

fn cmp_float(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

// Exact comparison; `i as f64` would round large integers.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal if f > whole => Ordering::Less,
        Ordering::Equal if f < whole => Ordering::Greater,
        other => other,
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::None, SortKey::None) => Ordering::Equal,
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => cmp_float(*a, *b),
            (SortKey::Int(a), SortKey::Float(b)) => cmp_int_float(*a, *b),
            (SortKey::Float(a), SortKey::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl From<&DisplayValue> for SortKey {
    fn from(value: &DisplayValue) -> Self {
        match value {
            DisplayValue::None => SortKey::None,
            DisplayValue::Text(s) => SortKey::Text(s.clone()),
            DisplayValue::Int(n) => SortKey::Int(*n),
            DisplayValue::Float(n) => SortKey::Float(*n),
            DisplayValue::Bool(b) => SortKey::Bool(*b),
        }
    }
}

impl From<DisplayValue> for SortKey {
    fn from(value: DisplayValue) -> Self {
        match value {
            DisplayValue::Text(s) => SortKey::Text(s),
            other => SortKey::from(&other),
        }
    }
}

macro_rules! key_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SortKey {
                fn from(value: $t) -> Self {
                    SortKey::from(DisplayValue::from(value))
                }
            }
        )*
    };
}

key_from_scalar!(&str, String, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, bool);

/// Index into the display's image list.
///
/// [`ImageIndex::NONE`] means the row shows no image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageIndex(pub i32);

impl ImageIndex {
    /// The "no image" sentinel.
    pub const NONE: ImageIndex = ImageIndex(-1);

    /// Returns `true` if this is the "no image" sentinel.
    pub fn is_none(self) -> bool {
        self.0 < 0
    }
}

impl Default for ImageIndex {
    fn default() -> Self {
        Self::NONE
    }
}

/// Rendering hints for a row, derived from its tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemState {
    /// The row is tagged `"selected"`.
    pub selected: bool,
    /// The row is the focus anchor (tagged `"current"`).
    pub current: bool,
    /// The row carries some other application tag.
    pub highlighted: bool,
}

impl ItemState {
    /// No special state.
    pub const NORMAL: ItemState = ItemState {
        selected: false,
        current: false,
        highlighted: false,
    };

    /// Returns `true` if no hint is set.
    pub fn is_normal(&self) -> bool {
        *self == Self::NORMAL
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl SortOrder {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Orients an ascending comparison result in this direction.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Horizontal text alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Align to the left edge.
    #[default]
    Left,
    /// Align to the center.
    Center,
    /// Align to the right edge.
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value_conversions() {
        assert_eq!(DisplayValue::from("a").as_text(), Some("a"));
        assert_eq!(DisplayValue::from(7u8).as_int(), Some(7));
        assert_eq!(DisplayValue::from(2.5f64).as_float(), Some(2.5));
        assert_eq!(DisplayValue::from(true).as_bool(), Some(true));
        assert_eq!(DisplayValue::from(Option::<i32>::None), DisplayValue::None);
        assert_eq!(DisplayValue::from(u64::MAX).as_float(), Some(u64::MAX as f64));
    }

    #[test]
    fn test_display_value_text() {
        assert_eq!(DisplayValue::Int(-3).to_string(), "-3");
        assert_eq!(DisplayValue::Float(1.5).to_string(), "1.5");
        assert_eq!(DisplayValue::Bool(false).to_string(), "false");
        assert_eq!(DisplayValue::None.to_string(), "");
    }

    #[test]
    fn test_sort_key_kind_order() {
        let mut keys = vec![
            SortKey::from("b"),
            SortKey::from(3),
            SortKey::None,
            SortKey::from(true),
            SortKey::from("a"),
            SortKey::from(-1.5),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SortKey::None,
                SortKey::Bool(true),
                SortKey::Float(-1.5),
                SortKey::Int(3),
                SortKey::from("a"),
                SortKey::from("b"),
            ]
        );
    }

    #[test]
    fn test_sort_key_mixed_numbers() {
        assert!(SortKey::Int(2) < SortKey::Float(2.5));
        assert!(SortKey::Float(1.5) < SortKey::Int(2));
        assert_eq!(SortKey::Int(2), SortKey::Float(2.0));
        assert!(SortKey::Int(-3) > SortKey::Float(-3.5));
        assert!(SortKey::Int(i64::MAX) < SortKey::Float(1e19));
        assert!(SortKey::Int(i64::MIN) > SortKey::Float(-1e19));
    }

    #[test]
    fn test_sort_key_nan_sorts_last_among_numbers() {
        let nan = SortKey::Float(f64::NAN);
        assert!(nan > SortKey::Float(f64::INFINITY));
        assert!(nan > SortKey::Int(i64::MAX));
        assert!(nan < SortKey::from(""));
        assert_eq!(nan, SortKey::Float(f64::NAN));
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.reversed(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Ascending.apply(Ordering::Less), Ordering::Less);
    }

    #[test]
    fn test_image_index_sentinel() {
        assert!(ImageIndex::NONE.is_none());
        assert!(ImageIndex::default().is_none());
        assert!(!ImageIndex(0).is_none());
    }

    #[test]
    fn test_item_state_normal() {
        assert!(ItemState::default().is_normal());
        let state = ItemState {
            selected: true,
            ..ItemState::NORMAL
        };
        assert!(!state.is_normal());
    }
}
