//! Data describing each kind of element.
//!
//! Essentially an embedding of the [OGC KML 2.2](https://www.ogc.org/standard/kml/) schema.
//! Abstract groups such as `Feature` are listed alongside concrete elements so that
//! ancestry can be expressed with a single `extends` link per kind.

use crate::{
    attribute::AttrId,
    schema::{Content, Slot},
    value::{self, ValueType},
};
use smallvec::SmallVec;
use std::fmt::Display;

pub use category::ElementCategory;

mod category;

type E = ElementId;

const ABSTRACT: Content = Content::Abstract;
const COMPLEX: Content = Content::Complex;
const TEXT: Content = Content::Text;
const STRING: Content = Content::Simple(ValueType::String);
const BOOL: Content = Content::Simple(ValueType::Bool);
const DOUBLE: Content = Content::Simple(ValueType::Double);
const INT: Content = Content::Simple(ValueType::Int);
const COLOR: Content = Content::Simple(ValueType::Color);

const fn keyword(values: &'static [&'static str]) -> Content {
    Content::Simple(ValueType::Enum(values))
}

const LINK_SLOTS: &[Slot] = &[
    Slot::one(E::RefreshMode),
    Slot::one(E::RefreshInterval),
    Slot::one(E::ViewRefreshMode),
    Slot::one(E::ViewRefreshTime),
    Slot::one(E::ViewBoundScale),
    Slot::one(E::ViewFormat),
    Slot::one(E::HttpQuery),
];

#[derive(Debug)]
/// The static definition of an element kind
pub struct Definition {
    /// The name as written in a document
    pub name: &'static str,
    /// The kind this one inherits slots and attributes from
    pub extends: Option<ElementId>,
    /// What the element may contain
    pub content: Content,
    /// The group flag contributed by an abstract kind
    pub category: ElementCategory,
    /// Slots declared by this kind, excluding inherited ones
    pub slots: &'static [Slot],
    /// Attributes declared by this kind, excluding inherited ones
    pub attributes: &'static [AttrId],
}

macro_rules! define_elements {
    ($($element:ident {
        name: $name:literal,
        extends: $extends:expr,
        content: $content:expr,
        $(category: $category:expr,)?
        $(slots: $slots:expr,)?
        $(attributes: $attributes:expr,)?
    },)+) => {
        macro_rules! category_else {
            ($_category:expr) => { $_category };
            () => { ElementCategory::empty() };
        }
        macro_rules! list_else {
            ($_list:expr) => { $_list };
            () => { &[] };
        }

        #[allow(non_upper_case_globals)]
        mod _definition {
            use super::*;
            $(pub const $element: &Definition = &Definition {
                name: $name,
                extends: $extends,
                content: $content,
                category: category_else!($($category)?),
                slots: list_else!($($slots)?),
                attributes: list_else!($($attributes)?),
            };)+
            pub const Unknown: &Definition = &Definition {
                name: "",
                extends: None,
                content: Content::Complex,
                category: ElementCategory::empty(),
                slots: &[],
                attributes: &[],
            };
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        /// Identifies the kind of an element
        pub enum ElementId {
            $(
                #[doc=concat!("The `", $name, "` element")]
                $element,
            )+
            /// An element that isn't a well-known `ElementId`
            Unknown,
        }

        impl ElementId {
            /// Every kind, in declaration order, ending with [`ElementId::Unknown`]
            pub const ALL: &'static [ElementId] = &[$(Self::$element,)+ Self::Unknown];

            fn lookup(name: &str) -> Self {
                match name {
                    $($name => Self::$element,)+
                    _ => Self::Unknown,
                }
            }

            /// Returns the static definition of the kind
            pub const fn definition(self) -> &'static Definition {
                match self {
                    $(Self::$element => _definition::$element,)+
                    Self::Unknown => _definition::Unknown,
                }
            }
        }
    };
}

impl ElementId {
    /// Returns the kind matching the name of an element in a document.
    ///
    /// Names of abstract groups aren't valid in a document, so they resolve to
    /// [`ElementId::Unknown`] like any other unrecognised name.
    pub fn from_name(name: &str) -> Self {
        let id = Self::lookup(name);
        if id.is_abstract() {
            Self::Unknown
        } else {
            id
        }
    }

    /// Returns the name of the kind as written in a document
    pub const fn name(self) -> &'static str {
        self.definition().name
    }

    /// Returns the kind this one directly inherits from
    pub const fn extends(self) -> Option<ElementId> {
        self.definition().extends
    }

    /// Returns what elements of this kind may contain
    pub const fn content(self) -> Content {
        self.definition().content
    }

    /// Whether the kind is an abstract group that can't appear in a document
    pub const fn is_abstract(self) -> bool {
        matches!(self.content(), Content::Abstract)
    }

    /// Whether the kind is a simple field that's stored as a value of its parent
    pub const fn is_simple(self) -> bool {
        matches!(self.content(), Content::Simple(_))
    }

    /// Whether elements of the kind keep their text content
    pub const fn has_text(self) -> bool {
        matches!(self.content(), Content::Text | Content::Simple(_))
    }

    /// Returns the declared value type of a simple field
    pub const fn value_type(self) -> Option<ValueType> {
        match self.content() {
            Content::Simple(value_type) => Some(value_type),
            _ => None,
        }
    }

    /// Returns the kind followed by each kind it inherits from, most derived first
    pub fn ancestry(self) -> SmallVec<[ElementId; 6]> {
        let mut result = SmallVec::new();
        let mut current = Some(self);
        while let Some(id) = current {
            result.push(id);
            current = id.extends();
        }
        result
    }

    /// Whether the kind is the given kind or inherits from it
    pub fn is_a(self, ancestor: ElementId) -> bool {
        let mut current = Some(self);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = id.extends();
        }
        false
    }

    /// Returns the groups the kind belongs to
    pub fn categories(self) -> ElementCategory {
        self.ancestry()
            .into_iter()
            .fold(ElementCategory::empty(), |acc, id| {
                acc.union(id.definition().category)
            })
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// NOTE: Slots are listed in the order the schema's sequences declare them, which is the
//       order they're serialized in. Inherited slots always come first.
// NOTE: `atom:*`, `xal:*` and `gx:*` extensions aren't listed and are kept as unknown
//       content.
define_elements! {
    Object {
        name: "Object",
        extends: None,
        content: ABSTRACT,
        category: ElementCategory::Object,
        attributes: &[AttrId::Id, AttrId::TargetId],
    },
    Feature {
        name: "Feature",
        extends: Some(E::Object),
        content: ABSTRACT,
        category: ElementCategory::Feature,
        slots: &[
            Slot::one(E::Name),
            Slot::one(E::Visibility),
            Slot::one(E::Open),
            Slot::one(E::Address),
            Slot::one(E::PhoneNumber),
            Slot::one(E::Snippet),
            Slot::one(E::Description),
            Slot::one(E::AbstractView),
            Slot::one(E::TimePrimitive),
            Slot::one(E::StyleUrl),
            Slot::many(E::StyleSelector),
            Slot::one(E::Region),
            Slot::one(E::ExtendedData),
        ],
    },
    Container {
        name: "Container",
        extends: Some(E::Feature),
        content: ABSTRACT,
        category: ElementCategory::Container,
    },
    Overlay {
        name: "Overlay",
        extends: Some(E::Feature),
        content: ABSTRACT,
        category: ElementCategory::Overlay,
        slots: &[
            Slot::one(E::Color),
            Slot::one(E::DrawOrder),
            Slot::one(E::Icon),
        ],
    },
    Geometry {
        name: "Geometry",
        extends: Some(E::Object),
        content: ABSTRACT,
        category: ElementCategory::Geometry,
    },
    StyleSelector {
        name: "StyleSelector",
        extends: Some(E::Object),
        content: ABSTRACT,
        category: ElementCategory::StyleSelector,
    },
    SubStyle {
        name: "SubStyle",
        extends: Some(E::Object),
        content: ABSTRACT,
        category: ElementCategory::SubStyle,
    },
    ColorStyle {
        name: "ColorStyle",
        extends: Some(E::SubStyle),
        content: ABSTRACT,
        category: ElementCategory::ColorStyle,
        slots: &[Slot::one(E::Color), Slot::one(E::ColorMode)],
    },
    AbstractView {
        name: "AbstractView",
        extends: Some(E::Object),
        content: ABSTRACT,
        category: ElementCategory::AbstractView,
    },
    TimePrimitive {
        name: "TimePrimitive",
        extends: Some(E::Object),
        content: ABSTRACT,
        category: ElementCategory::TimePrimitive,
    },
    AbstractLatLonBox {
        name: "AbstractLatLonBox",
        extends: Some(E::Object),
        content: ABSTRACT,
        category: ElementCategory::AbstractLatLonBox,
        slots: &[
            Slot::one(E::North),
            Slot::one(E::South),
            Slot::one(E::East),
            Slot::one(E::West),
        ],
    },
    BasicLink {
        name: "BasicLink",
        extends: Some(E::Object),
        content: ABSTRACT,
        category: ElementCategory::BasicLink,
        slots: &[Slot::one(E::Href)],
    },
    Vec2 {
        name: "Vec2",
        extends: None,
        content: ABSTRACT,
        category: ElementCategory::Vec2,
        attributes: &[AttrId::X, AttrId::Y, AttrId::Xunits, AttrId::Yunits],
    },
    UpdateOperation {
        name: "UpdateOperation",
        extends: None,
        content: ABSTRACT,
        category: ElementCategory::UpdateOperation,
    },

    // Root
    Kml {
        name: "kml",
        extends: None,
        content: COMPLEX,
        slots: &[Slot::one(E::NetworkLinkControl), Slot::one(E::Feature)],
        attributes: &[AttrId::Hint],
    },

    // Features
    Document {
        name: "Document",
        extends: Some(E::Container),
        content: COMPLEX,
        slots: &[Slot::many(E::Schema), Slot::many(E::Feature)],
    },
    Folder {
        name: "Folder",
        extends: Some(E::Container),
        content: COMPLEX,
        slots: &[Slot::many(E::Feature)],
    },
    Placemark {
        name: "Placemark",
        extends: Some(E::Feature),
        content: COMPLEX,
        slots: &[Slot::one(E::Geometry)],
    },
    NetworkLink {
        name: "NetworkLink",
        extends: Some(E::Feature),
        content: COMPLEX,
        slots: &[
            Slot::one(E::RefreshVisibility),
            Slot::one(E::FlyToView),
            Slot::one(E::Link),
        ],
    },
    GroundOverlay {
        name: "GroundOverlay",
        extends: Some(E::Overlay),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Altitude),
            Slot::one(E::AltitudeMode),
            Slot::one(E::LatLonBox),
        ],
    },
    ScreenOverlay {
        name: "ScreenOverlay",
        extends: Some(E::Overlay),
        content: COMPLEX,
        slots: &[
            Slot::one(E::OverlayXY),
            Slot::one(E::ScreenXY),
            Slot::one(E::RotationXY),
            Slot::one(E::Size),
            Slot::one(E::Rotation),
        ],
    },
    PhotoOverlay {
        name: "PhotoOverlay",
        extends: Some(E::Overlay),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Rotation),
            Slot::one(E::ViewVolume),
            Slot::one(E::ImagePyramid),
            Slot::one(E::Point),
            Slot::one(E::Shape),
        ],
    },

    // Geometry
    Point {
        name: "Point",
        extends: Some(E::Geometry),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Extrude),
            Slot::one(E::AltitudeMode),
            Slot::one(E::Coordinates),
        ],
    },
    LineString {
        name: "LineString",
        extends: Some(E::Geometry),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Extrude),
            Slot::one(E::Tessellate),
            Slot::one(E::AltitudeMode),
            Slot::one(E::Coordinates),
        ],
    },
    LinearRing {
        name: "LinearRing",
        extends: Some(E::Geometry),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Extrude),
            Slot::one(E::Tessellate),
            Slot::one(E::AltitudeMode),
            Slot::one(E::Coordinates),
        ],
    },
    Polygon {
        name: "Polygon",
        extends: Some(E::Geometry),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Extrude),
            Slot::one(E::Tessellate),
            Slot::one(E::AltitudeMode),
            Slot::one(E::OuterBoundaryIs),
            Slot::many(E::InnerBoundaryIs),
        ],
    },
    OuterBoundaryIs {
        name: "outerBoundaryIs",
        extends: None,
        content: COMPLEX,
        slots: &[Slot::one(E::LinearRing)],
    },
    InnerBoundaryIs {
        name: "innerBoundaryIs",
        extends: None,
        content: COMPLEX,
        slots: &[Slot::one(E::LinearRing)],
    },
    MultiGeometry {
        name: "MultiGeometry",
        extends: Some(E::Geometry),
        content: COMPLEX,
        slots: &[Slot::many(E::Geometry)],
    },
    Model {
        name: "Model",
        extends: Some(E::Geometry),
        content: COMPLEX,
        slots: &[
            Slot::one(E::AltitudeMode),
            Slot::one(E::Location),
            Slot::one(E::Orientation),
            Slot::one(E::ScaleModel),
            Slot::one(E::Link),
            Slot::one(E::ResourceMap),
        ],
    },
    Location {
        name: "Location",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Longitude),
            Slot::one(E::Latitude),
            Slot::one(E::Altitude),
        ],
    },
    Orientation {
        name: "Orientation",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Heading),
            Slot::one(E::Tilt),
            Slot::one(E::Roll),
        ],
    },
    ScaleModel {
        name: "Scale",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[Slot::one(E::X), Slot::one(E::Y), Slot::one(E::Z)],
    },
    ResourceMap {
        name: "ResourceMap",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[Slot::many(E::Alias)],
    },
    Alias {
        name: "Alias",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[Slot::one(E::TargetHref), Slot::one(E::SourceHref)],
    },

    // Styles
    Style {
        name: "Style",
        extends: Some(E::StyleSelector),
        content: COMPLEX,
        slots: &[
            Slot::one(E::IconStyle),
            Slot::one(E::LabelStyle),
            Slot::one(E::LineStyle),
            Slot::one(E::PolyStyle),
            Slot::one(E::BalloonStyle),
            Slot::one(E::ListStyle),
        ],
    },
    StyleMap {
        name: "StyleMap",
        extends: Some(E::StyleSelector),
        content: COMPLEX,
        slots: &[Slot::many(E::Pair)],
    },
    Pair {
        name: "Pair",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Key),
            Slot::one(E::StyleUrl),
            Slot::one(E::StyleSelector),
        ],
    },
    IconStyle {
        name: "IconStyle",
        extends: Some(E::ColorStyle),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Scale),
            Slot::one(E::Heading),
            Slot::one(E::Icon),
            Slot::one(E::HotSpot),
        ],
    },
    LabelStyle {
        name: "LabelStyle",
        extends: Some(E::ColorStyle),
        content: COMPLEX,
        slots: &[Slot::one(E::Scale)],
    },
    LineStyle {
        name: "LineStyle",
        extends: Some(E::ColorStyle),
        content: COMPLEX,
        slots: &[Slot::one(E::Width)],
    },
    PolyStyle {
        name: "PolyStyle",
        extends: Some(E::ColorStyle),
        content: COMPLEX,
        slots: &[Slot::one(E::Fill), Slot::one(E::Outline)],
    },
    BalloonStyle {
        name: "BalloonStyle",
        extends: Some(E::SubStyle),
        content: COMPLEX,
        slots: &[
            Slot::one(E::BgColor),
            Slot::one(E::TextColor),
            Slot::one(E::Text),
            Slot::one(E::DisplayMode),
        ],
    },
    ListStyle {
        name: "ListStyle",
        extends: Some(E::SubStyle),
        content: COMPLEX,
        slots: &[
            Slot::one(E::ListItemType),
            Slot::one(E::BgColor),
            Slot::many(E::ItemIcon),
            Slot::one(E::MaxSnippetLines),
        ],
    },
    ItemIcon {
        name: "ItemIcon",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[Slot::one(E::State), Slot::one(E::Href)],
    },

    // Links
    Icon {
        name: "Icon",
        extends: Some(E::BasicLink),
        content: COMPLEX,
        slots: LINK_SLOTS,
    },
    Link {
        name: "Link",
        extends: Some(E::BasicLink),
        content: COMPLEX,
        slots: LINK_SLOTS,
    },
    HotSpot {
        name: "hotSpot",
        extends: Some(E::Vec2),
        content: COMPLEX,
    },
    OverlayXY {
        name: "overlayXY",
        extends: Some(E::Vec2),
        content: COMPLEX,
    },
    ScreenXY {
        name: "screenXY",
        extends: Some(E::Vec2),
        content: COMPLEX,
    },
    RotationXY {
        name: "rotationXY",
        extends: Some(E::Vec2),
        content: COMPLEX,
    },
    Size {
        name: "size",
        extends: Some(E::Vec2),
        content: COMPLEX,
    },

    // Regions and views
    Region {
        name: "Region",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[Slot::one(E::LatLonAltBox), Slot::one(E::Lod)],
    },
    LatLonAltBox {
        name: "LatLonAltBox",
        extends: Some(E::AbstractLatLonBox),
        content: COMPLEX,
        slots: &[
            Slot::one(E::MinAltitude),
            Slot::one(E::MaxAltitude),
            Slot::one(E::AltitudeMode),
        ],
    },
    LatLonBox {
        name: "LatLonBox",
        extends: Some(E::AbstractLatLonBox),
        content: COMPLEX,
        slots: &[Slot::one(E::Rotation)],
    },
    Lod {
        name: "Lod",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[
            Slot::one(E::MinLodPixels),
            Slot::one(E::MaxLodPixels),
            Slot::one(E::MinFadeExtent),
            Slot::one(E::MaxFadeExtent),
        ],
    },
    Camera {
        name: "Camera",
        extends: Some(E::AbstractView),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Longitude),
            Slot::one(E::Latitude),
            Slot::one(E::Altitude),
            Slot::one(E::Heading),
            Slot::one(E::Tilt),
            Slot::one(E::Roll),
            Slot::one(E::AltitudeMode),
        ],
    },
    LookAt {
        name: "LookAt",
        extends: Some(E::AbstractView),
        content: COMPLEX,
        slots: &[
            Slot::one(E::Longitude),
            Slot::one(E::Latitude),
            Slot::one(E::Altitude),
            Slot::one(E::Heading),
            Slot::one(E::Tilt),
            Slot::one(E::Range),
            Slot::one(E::AltitudeMode),
        ],
    },
    TimeStamp {
        name: "TimeStamp",
        extends: Some(E::TimePrimitive),
        content: COMPLEX,
        slots: &[Slot::one(E::When)],
    },
    TimeSpan {
        name: "TimeSpan",
        extends: Some(E::TimePrimitive),
        content: COMPLEX,
        slots: &[Slot::one(E::Begin), Slot::one(E::End)],
    },
    ViewVolume {
        name: "ViewVolume",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[
            Slot::one(E::LeftFov),
            Slot::one(E::RightFov),
            Slot::one(E::BottomFov),
            Slot::one(E::TopFov),
            Slot::one(E::Near),
        ],
    },
    ImagePyramid {
        name: "ImagePyramid",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[
            Slot::one(E::TileSize),
            Slot::one(E::MaxWidth),
            Slot::one(E::MaxHeight),
            Slot::one(E::GridOrigin),
        ],
    },

    // Extended data
    ExtendedData {
        name: "ExtendedData",
        extends: None,
        content: COMPLEX,
        slots: &[Slot::many(E::Data), Slot::many(E::SchemaData)],
    },
    Data {
        name: "Data",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[Slot::one(E::DisplayName), Slot::one(E::Value)],
        attributes: &[AttrId::Name],
    },
    SchemaData {
        name: "SchemaData",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[Slot::many(E::SimpleData)],
        attributes: &[AttrId::SchemaUrl],
    },
    SimpleData {
        name: "SimpleData",
        extends: None,
        content: TEXT,
        attributes: &[AttrId::Name],
    },
    Schema {
        name: "Schema",
        extends: Some(E::Object),
        content: COMPLEX,
        slots: &[Slot::many(E::SimpleField)],
        attributes: &[AttrId::Name],
    },
    SimpleField {
        name: "SimpleField",
        extends: None,
        content: COMPLEX,
        slots: &[Slot::one(E::DisplayName)],
        attributes: &[AttrId::Type, AttrId::Name],
    },
    Snippet {
        name: "Snippet",
        extends: None,
        content: TEXT,
        attributes: &[AttrId::MaxLines],
    },

    // Network link control
    NetworkLinkControl {
        name: "NetworkLinkControl",
        extends: None,
        content: COMPLEX,
        slots: &[
            Slot::one(E::MinRefreshPeriod),
            Slot::one(E::MaxSessionLength),
            Slot::one(E::Cookie),
            Slot::one(E::Message),
            Slot::one(E::LinkName),
            Slot::one(E::LinkDescription),
            Slot::one(E::LinkSnippet),
            Slot::one(E::Expires),
            Slot::one(E::Update),
            Slot::one(E::AbstractView),
        ],
    },
    LinkSnippet {
        name: "linkSnippet",
        extends: None,
        content: TEXT,
        attributes: &[AttrId::MaxLines],
    },
    Update {
        name: "Update",
        extends: None,
        content: COMPLEX,
        slots: &[Slot::one(E::TargetHref), Slot::many(E::UpdateOperation)],
    },
    Create {
        name: "Create",
        extends: Some(E::UpdateOperation),
        content: COMPLEX,
        slots: &[Slot::many(E::Container)],
    },
    Delete {
        name: "Delete",
        extends: Some(E::UpdateOperation),
        content: COMPLEX,
        slots: &[Slot::many(E::Feature)],
    },
    Change {
        name: "Change",
        extends: Some(E::UpdateOperation),
        content: COMPLEX,
        slots: &[Slot::many(E::Object)],
    },

    // Simple fields
    Name { name: "name", extends: None, content: STRING, },
    Visibility { name: "visibility", extends: None, content: BOOL, },
    Open { name: "open", extends: None, content: BOOL, },
    Address { name: "address", extends: None, content: STRING, },
    PhoneNumber { name: "phoneNumber", extends: None, content: STRING, },
    Description { name: "description", extends: None, content: STRING, },
    StyleUrl { name: "styleUrl", extends: None, content: STRING, },
    Color { name: "color", extends: None, content: COLOR, },
    ColorMode { name: "colorMode", extends: None, content: keyword(value::ColorMode::VALUES), },
    DrawOrder { name: "drawOrder", extends: None, content: INT, },
    Altitude { name: "altitude", extends: None, content: DOUBLE, },
    AltitudeMode { name: "altitudeMode", extends: None, content: keyword(value::AltitudeMode::VALUES), },
    Rotation { name: "rotation", extends: None, content: DOUBLE, },
    Shape { name: "shape", extends: None, content: keyword(value::Shape::VALUES), },
    Extrude { name: "extrude", extends: None, content: BOOL, },
    Tessellate { name: "tessellate", extends: None, content: BOOL, },
    Coordinates { name: "coordinates", extends: None, content: STRING, },
    Longitude { name: "longitude", extends: None, content: DOUBLE, },
    Latitude { name: "latitude", extends: None, content: DOUBLE, },
    Heading { name: "heading", extends: None, content: DOUBLE, },
    Tilt { name: "tilt", extends: None, content: DOUBLE, },
    Roll { name: "roll", extends: None, content: DOUBLE, },
    Range { name: "range", extends: None, content: DOUBLE, },
    X { name: "x", extends: None, content: DOUBLE, },
    Y { name: "y", extends: None, content: DOUBLE, },
    Z { name: "z", extends: None, content: DOUBLE, },
    TargetHref { name: "targetHref", extends: None, content: STRING, },
    SourceHref { name: "sourceHref", extends: None, content: STRING, },
    Key { name: "key", extends: None, content: keyword(value::StyleState::VALUES), },
    Scale { name: "scale", extends: None, content: DOUBLE, },
    Width { name: "width", extends: None, content: DOUBLE, },
    Fill { name: "fill", extends: None, content: BOOL, },
    Outline { name: "outline", extends: None, content: BOOL, },
    BgColor { name: "bgColor", extends: None, content: COLOR, },
    TextColor { name: "textColor", extends: None, content: COLOR, },
    Text { name: "text", extends: None, content: STRING, },
    DisplayMode { name: "displayMode", extends: None, content: keyword(value::DisplayMode::VALUES), },
    ListItemType { name: "listItemType", extends: None, content: keyword(value::ListItemType::VALUES), },
    MaxSnippetLines { name: "maxSnippetLines", extends: None, content: INT, },
    State { name: "state", extends: None, content: STRING, },
    Href { name: "href", extends: None, content: STRING, },
    RefreshMode { name: "refreshMode", extends: None, content: keyword(value::RefreshMode::VALUES), },
    RefreshInterval { name: "refreshInterval", extends: None, content: DOUBLE, },
    ViewRefreshMode { name: "viewRefreshMode", extends: None, content: keyword(value::ViewRefreshMode::VALUES), },
    ViewRefreshTime { name: "viewRefreshTime", extends: None, content: DOUBLE, },
    ViewBoundScale { name: "viewBoundScale", extends: None, content: DOUBLE, },
    ViewFormat { name: "viewFormat", extends: None, content: STRING, },
    HttpQuery { name: "httpQuery", extends: None, content: STRING, },
    North { name: "north", extends: None, content: DOUBLE, },
    South { name: "south", extends: None, content: DOUBLE, },
    East { name: "east", extends: None, content: DOUBLE, },
    West { name: "west", extends: None, content: DOUBLE, },
    MinAltitude { name: "minAltitude", extends: None, content: DOUBLE, },
    MaxAltitude { name: "maxAltitude", extends: None, content: DOUBLE, },
    MinLodPixels { name: "minLodPixels", extends: None, content: DOUBLE, },
    MaxLodPixels { name: "maxLodPixels", extends: None, content: DOUBLE, },
    MinFadeExtent { name: "minFadeExtent", extends: None, content: DOUBLE, },
    MaxFadeExtent { name: "maxFadeExtent", extends: None, content: DOUBLE, },
    When { name: "when", extends: None, content: STRING, },
    Begin { name: "begin", extends: None, content: STRING, },
    End { name: "end", extends: None, content: STRING, },
    DisplayName { name: "displayName", extends: None, content: STRING, },
    Value { name: "value", extends: None, content: STRING, },
    LeftFov { name: "leftFov", extends: None, content: DOUBLE, },
    RightFov { name: "rightFov", extends: None, content: DOUBLE, },
    BottomFov { name: "bottomFov", extends: None, content: DOUBLE, },
    TopFov { name: "topFov", extends: None, content: DOUBLE, },
    Near { name: "near", extends: None, content: DOUBLE, },
    TileSize { name: "tileSize", extends: None, content: INT, },
    MaxWidth { name: "maxWidth", extends: None, content: INT, },
    MaxHeight { name: "maxHeight", extends: None, content: INT, },
    GridOrigin { name: "gridOrigin", extends: None, content: keyword(value::GridOrigin::VALUES), },
    RefreshVisibility { name: "refreshVisibility", extends: None, content: BOOL, },
    FlyToView { name: "flyToView", extends: None, content: BOOL, },
    MinRefreshPeriod { name: "minRefreshPeriod", extends: None, content: DOUBLE, },
    MaxSessionLength { name: "maxSessionLength", extends: None, content: DOUBLE, },
    Cookie { name: "cookie", extends: None, content: STRING, },
    Message { name: "message", extends: None, content: STRING, },
    LinkName { name: "linkName", extends: None, content: STRING, },
    LinkDescription { name: "linkDescription", extends: None, content: STRING, },
    Expires { name: "expires", extends: None, content: STRING, },
}

#[cfg(test)]
mod test {
    use super::{ElementCategory, ElementId};
    use crate::value::ValueType;

    #[test]
    fn names_round_trip() {
        for id in ElementId::ALL {
            if id.is_abstract() || *id == ElementId::Unknown {
                continue;
            }
            assert_eq!(ElementId::from_name(id.name()), *id, "{id:?}");
        }
    }

    #[test]
    fn unrecognised_names() {
        assert_eq!(ElementId::from_name("placemark"), ElementId::Unknown);
        assert_eq!(ElementId::from_name("gx:Tour"), ElementId::Unknown);
        assert_eq!(ElementId::from_name("Feature"), ElementId::Unknown);
        assert_eq!(ElementId::from_name("Scale"), ElementId::ScaleModel);
        assert_eq!(ElementId::from_name("scale"), ElementId::Scale);
    }

    #[test]
    fn ancestry() {
        assert!(ElementId::Document.is_a(ElementId::Container));
        assert!(ElementId::Document.is_a(ElementId::Feature));
        assert!(ElementId::Document.is_a(ElementId::Object));
        assert!(!ElementId::Document.is_a(ElementId::Geometry));
        assert!(ElementId::StyleMap.is_a(ElementId::StyleSelector));
        assert!(ElementId::IconStyle.is_a(ElementId::SubStyle));
        assert!(!ElementId::Icon.is_a(ElementId::Link));
        assert!(!ElementId::Unknown.is_a(ElementId::Object));
        assert_eq!(
            ElementId::GroundOverlay.categories(),
            ElementCategory::Object | ElementCategory::Feature | ElementCategory::Overlay
        );
        assert_eq!(
            ElementId::Placemark.ancestry().as_slice(),
            &[ElementId::Placemark, ElementId::Feature, ElementId::Object]
        );
    }

    #[test]
    fn content() {
        assert!(ElementId::Name.is_simple());
        assert_eq!(ElementId::Visibility.value_type(), Some(ValueType::Bool));
        assert!(ElementId::Snippet.has_text());
        assert!(!ElementId::Snippet.is_simple());
        assert!(!ElementId::Placemark.has_text());
    }
}
