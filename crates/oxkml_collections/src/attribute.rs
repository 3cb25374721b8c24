//! Attributes recognised on KML elements.
//!
//! Any attribute not listed here (including namespace declarations) is kept by the tree as
//! an unknown attribute in the order it was found.

macro_rules! define_attrs {
    ($($(#[$meta:meta])* $attr:ident { name: $name:literal },)+) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        /// Identifies a known attribute by its name
        pub enum AttrId {
            $(
                $(#[$meta])*
                #[doc=concat!("The `", $name, "` attribute")]
                $attr,
            )+
        }

        impl AttrId {
            /// Every known attribute
            pub const ALL: &'static [AttrId] = &[$(Self::$attr,)+];

            /// Returns the attribute matching the name, if any.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$attr),)+
                    _ => None,
                }
            }

            /// Returns the name of the attribute as written in a document.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$attr => $name,)+
                }
            }
        }
    };
}

define_attrs! {
    Id { name: "id" },
    TargetId { name: "targetId" },
    Name { name: "name" },
    Type { name: "type" },
    SchemaUrl { name: "schemaUrl" },
    Hint { name: "hint" },
    MaxLines { name: "maxLines" },
    X { name: "x" },
    Y { name: "y" },
    Xunits { name: "xunits" },
    Yunits { name: "yunits" },
}

impl std::fmt::Display for AttrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::AttrId;

    #[test]
    fn attr_names() {
        for attr in AttrId::ALL {
            assert_eq!(AttrId::from_name(attr.name()), Some(*attr));
        }
        assert_eq!(AttrId::from_name("xmlns"), None);
        assert_eq!(AttrId::from_name("ID"), None);
    }
}
