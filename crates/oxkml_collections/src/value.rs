//! Typed values held by simple fields.
//!
//! Fields are stored as text so that unusual but valid input survives a round-trip. The
//! [`FieldValue`] trait converts between that text and a typed value.
use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The type of value declared for a simple field
pub enum ValueType {
    /// Any text
    String,
    /// `1`, `0`, `true` or `false`
    Bool,
    /// A floating point number
    Double,
    /// An integer
    Int,
    /// A colour in `aabbggrr` hex notation
    Color,
    /// One of a fixed set of keywords
    Enum(&'static [&'static str]),
}

impl ValueType {
    /// Returns whether the text can be read as this type.
    pub fn is_valid(self, text: &str) -> bool {
        match self {
            Self::String => true,
            Self::Bool => bool::parse_value(text).is_some(),
            Self::Double => f64::parse_value(text).is_some(),
            Self::Int => i64::parse_value(text).is_some(),
            Self::Color => Color::parse_value(text).is_some(),
            Self::Enum(values) => values.contains(&text.trim()),
        }
    }
}

/// A value that can be stored in a simple field.
pub trait FieldValue: Sized {
    /// The field type this value is written as
    const VALUE_TYPE: ValueType;

    /// Returns whether a field of the given type can hold this value.
    fn accepts(value_type: ValueType) -> bool {
        value_type == Self::VALUE_TYPE
    }

    /// Reads a value from a field's text, returning `None` if it isn't valid.
    fn parse_value(text: &str) -> Option<Self>;

    /// Writes the value as a field's text.
    fn write_value(&self, dest: &mut String);

    /// Returns the value as a field's text.
    fn to_value(&self) -> String {
        let mut result = String::new();
        self.write_value(&mut result);
        result
    }
}

impl FieldValue for String {
    const VALUE_TYPE: ValueType = ValueType::String;

    fn accepts(_value_type: ValueType) -> bool {
        true
    }

    fn parse_value(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn write_value(&self, dest: &mut String) {
        dest.push_str(self);
    }
}

impl FieldValue for bool {
    const VALUE_TYPE: ValueType = ValueType::Bool;

    fn parse_value(text: &str) -> Option<Self> {
        match text.trim() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }

    fn write_value(&self, dest: &mut String) {
        dest.push(if *self { '1' } else { '0' });
    }
}

impl FieldValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Double;

    fn parse_value(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn write_value(&self, dest: &mut String) {
        let _ = write!(dest, "{self}");
    }
}

impl FieldValue for i64 {
    const VALUE_TYPE: ValueType = ValueType::Int;

    fn parse_value(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn write_value(&self, dest: &mut String) {
        let _ = write!(dest, "{self}");
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A colour with an alpha channel.
///
/// KML writes colours as `aabbggrr`, i.e. the reverse of the usual web order.
pub struct Color {
    /// Opacity, where `0xff` is opaque
    pub alpha: u8,
    /// The blue channel
    pub blue: u8,
    /// The green channel
    pub green: u8,
    /// The red channel
    pub red: u8,
}

impl Color {
    /// Creates a colour from a packed `0xaabbggrr` value
    pub const fn from_abgr(abgr: u32) -> Self {
        let [alpha, blue, green, red] = abgr.to_be_bytes();
        Self {
            alpha,
            blue,
            green,
            red,
        }
    }

    /// Returns the colour packed as `0xaabbggrr`
    pub const fn to_abgr(self) -> u32 {
        u32::from_be_bytes([self.alpha, self.blue, self.green, self.red])
    }
}

impl FieldValue for Color {
    const VALUE_TYPE: ValueType = ValueType::Color;

    fn parse_value(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text.strip_prefix('#').unwrap_or(text);
        if text.len() != 8 {
            return None;
        }
        u32::from_str_radix(text, 16).ok().map(Self::from_abgr)
    }

    fn write_value(&self, dest: &mut String) {
        let _ = write!(dest, "{:08x}", self.to_abgr());
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.to_abgr())
    }
}

#[macro_export]
/// Creates a field value type that consists of enumerable keywords
macro_rules! enum_value {
    (
        $(#[$outer:meta])*
        $value_type:ident { $(
            $(#[$meta:meta])*
            $name:ident: $value:literal$(,)?
        )+}
    ) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $(#[$outer])*
        pub enum $value_type {
            $(
                $(#[$meta])*
                $name,
            )+
        }

        impl $value_type {
            /// Every keyword of the type, in declaration order
            pub const VALUES: &'static [&'static str] = &[$($value,)+];

            /// Returns the keyword as written in a document
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$name => $value,)+
                }
            }
        }

        impl $crate::value::FieldValue for $value_type {
            const VALUE_TYPE: $crate::value::ValueType =
                $crate::value::ValueType::Enum(Self::VALUES);

            fn parse_value(text: &str) -> Option<Self> {
                match text.trim() {
                    $($value => Some(Self::$name),)+
                    _ => None,
                }
            }

            fn write_value(&self, dest: &mut String) {
                dest.push_str(self.as_str());
            }
        }

        impl std::fmt::Display for $value_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

enum_value!(
    /// How altitudes of a geometry, overlay or view are interpreted
    #[derive(Default)]
    AltitudeMode {
        /// Altitude is ignored and the shape follows the terrain
        #[default]
        ClampToGround: "clampToGround",
        /// Altitude is relative to the terrain
        RelativeToGround: "relativeToGround",
        /// Altitude is relative to sea level
        Absolute: "absolute",
    }
);
enum_value!(
    /// Whether a colour is used as given or randomised
    #[derive(Default)]
    ColorMode {
        /// The colour is used as given
        #[default]
        Normal: "normal",
        /// A random linear scale is applied to the colour
        Random: "random",
    }
);
enum_value!(
    /// Whether a balloon is shown
    #[derive(Default)]
    DisplayMode {
        /// The balloon is shown
        #[default]
        Default: "default",
        /// The balloon is hidden
        Hide: "hide",
    }
);
enum_value!(
    /// Selects which pair of a style map applies
    #[derive(Default)]
    StyleState {
        /// The feature is drawn as usual
        #[default]
        Normal: "normal",
        /// The feature is drawn while the pointer is over it
        Highlight: "highlight",
    }
);
enum_value!(
    /// How a feature and its children are shown in a list
    #[derive(Default)]
    ListItemType {
        /// Each item can be toggled
        #[default]
        Check: "check",
        /// Only turning every item off is allowed
        CheckOffOnly: "checkOffOnly",
        /// Children aren't shown in the list
        CheckHideChildren: "checkHideChildren",
        /// Only one child may be visible at a time
        RadioFolder: "radioFolder",
    }
);
enum_value!(
    /// When a link is refreshed based on time
    #[derive(Default)]
    RefreshMode {
        /// Refreshed when the file is loaded and when parameters change
        #[default]
        OnChange: "onChange",
        /// Refreshed every `refreshInterval` seconds
        OnInterval: "onInterval",
        /// Refreshed when the expiration time is reached
        OnExpire: "onExpire",
    }
);
enum_value!(
    /// When a link is refreshed based on the view
    #[derive(Default)]
    ViewRefreshMode {
        /// The view is ignored
        #[default]
        Never: "never",
        /// Refreshed after the view stops moving
        OnStop: "onStop",
        /// Refreshed only when the user asks
        OnRequest: "onRequest",
        /// Refreshed when the region becomes active
        OnRegion: "onRegion",
    }
);
enum_value!(
    /// The projection of a photo overlay
    #[derive(Default)]
    Shape {
        /// An ordinary photo
        #[default]
        Rectangle: "rectangle",
        /// A panorama, either partial or full cylinder
        Cylinder: "cylinder",
        /// A spherical panorama
        Sphere: "sphere",
    }
);
enum_value!(
    /// The corner where a photo overlay's tile rows start
    #[derive(Default)]
    GridOrigin {
        /// Rows start at the lower left
        #[default]
        LowerLeft: "lowerLeft",
        /// Rows start at the upper left
        UpperLeft: "upperLeft",
    }
);
enum_value!(
    /// Units of a screen position
    #[derive(Default)]
    Units {
        /// A fraction of the image or screen
        #[default]
        Fraction: "fraction",
        /// Pixels from the origin
        Pixels: "pixels",
        /// Pixels from the opposite corner
        InsetPixels: "insetPixels",
    }
);
