//! Categories for element
bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    /// Specifies which abstract groups an element belongs to.
    ///
    /// Each abstract element kind contributes one flag, so an element's categories are the
    /// union of the flags along its `extends` chain.
    pub struct ElementCategory: u32 {
        /// Elements with an `id` and `targetId`
        const Object = 1 << 0;
        /// Elements shown to the user as an entity on the map or in the places panel
        const Feature = 1 << 1;
        /// Features holding an ordered list of other features
        const Container = 1 << 2;
        /// Features that drape an image over the globe or screen
        const Overlay = 1 << 3;
        /// Shapes attached to a placemark
        const Geometry = 1 << 4;
        /// Either a style or a style map
        const StyleSelector = 1 << 5;
        /// Parts of a style
        const SubStyle = 1 << 6;
        /// Parts of a style with a color
        const ColorStyle = 1 << 7;
        /// Viewpoints such as a camera or look-at
        const AbstractView = 1 << 8;
        /// Timestamps and time spans
        const TimePrimitive = 1 << 9;
        /// Bounding boxes described by their edges
        const AbstractLatLonBox = 1 << 10;
        /// Elements carrying an `href`
        const BasicLink = 1 << 11;
        /// Screen positions described by `x`, `y` and their units
        const Vec2 = 1 << 12;
        /// Operations of an update
        const UpdateOperation = 1 << 13;
    }
}
