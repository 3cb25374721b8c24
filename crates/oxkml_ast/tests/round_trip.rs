use oxkml_ast::{document::Document, serialize::SerializeOptions};
use oxkml_collections::element::ElementId;
use oxkml_diagnostics::Warning;
use pretty_assertions::assert_eq;

const SAMPLE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2">
  <!-- written by hand -->
  <Document id="root">
    <Placemark id="line">
      <LineString>
        <coordinates>
          -112.2550785337791,36.07954952145647,2357
          -112.2549277039738,36.08117083492122,2357
        </coordinates>
        <tessellate>1</tessellate>
      </LineString>
      <styleUrl>#highlighted</styleUrl>
      <name>Trail</name>
    </Placemark>
    <StyleMap id="highlighted">
      <Pair><key>normal</key><styleUrl>#plain</styleUrl></Pair>
      <Pair><key>highlight</key><styleUrl>#bold</styleUrl></Pair>
    </StyleMap>
    <Style id="plain">
      <LineStyle><width>2</width><color>ff0000ff</color></LineStyle>
      <IconStyle>
        <Icon><href>http://example.com/icon.png?a=1&amp;b=2</href></Icon>
        <scale>1.1</scale>
      </IconStyle>
    </Style>
    <Folder>
      <visibility>0</visibility>
      <Placemark>
        <description><![CDATA[<p>A <b>bold</b> description</p>]]></description>
        <Snippet maxLines="2">  first line  </Snippet>
        <gx:balloonVisibility>1</gx:balloonVisibility>
        <Point><Style/><coordinates>1,2,3</coordinates></Point>
        <name>Ampersands &amp; angles &lt;&gt;</name>
      </Placemark>
      <gx:Tour>
        <gx:Playlist>
          <gx:FlyTo><gx:duration>2</gx:duration></gx:FlyTo>
          <gx:Wait/>
        </gx:Playlist>
      </gx:Tour>
      <Placemark>
        <Polygon>
          <outerBoundaryIs><LinearRing><coordinates>0,0 1,0 1,1 0,0</coordinates></LinearRing></outerBoundaryIs>
        </Polygon>
      </Placemark>
    </Folder>
    <name>Round trip</name>
  </Document>
</kml>
"##;

fn round_trip(source: &str, options: &SerializeOptions) -> String {
    Document::parse(source)
        .unwrap()
        .serialize(options)
        .unwrap()
}

#[test]
fn pretty_output_is_stable() {
    let options = SerializeOptions::pretty();
    let first = round_trip(SAMPLE, &options);
    let second = round_trip(&first, &options);
    assert_eq!(first, second);
}

#[test]
fn compact_output_is_stable() {
    let options = SerializeOptions::default();
    let first = round_trip(SAMPLE, &options);
    let second = round_trip(&first, &options);
    assert_eq!(first, second);

    let through_pretty = round_trip(&round_trip(SAMPLE, &SerializeOptions::pretty()), &options);
    assert_eq!(first, through_pretty);
}

#[test]
fn content_survives() {
    let first = round_trip(SAMPLE, &SerializeOptions::pretty().with_indent(4));
    let document = Document::parse(&first).unwrap();

    let mut ids: Vec<_> = document.index().ids().collect();
    ids.sort_unstable();
    assert_eq!(ids, ["highlighted", "line", "plain", "root"]);

    let root = document.lookup_by_id("root").unwrap();
    assert_eq!(root.field_text(ElementId::Name), Some("Round trip"));

    let folder = root.find_child(ElementId::Folder).unwrap();
    assert_eq!(folder.field::<bool>(ElementId::Visibility), Some(false));
    assert_eq!(folder.unknown_children().len(), 1);
    assert_eq!(folder.unknown_children()[0].name(), "gx:Tour");

    let placemark = folder.find_child(ElementId::Placemark).unwrap();
    assert_eq!(
        placemark.field_text(ElementId::Name),
        Some("Ampersands & angles <>")
    );
    assert_eq!(
        placemark.field_text(ElementId::Description),
        Some("<p>A <b>bold</b> description</p>")
    );
    let snippet = placemark.find_child(ElementId::Snippet).unwrap();
    assert_eq!(snippet.char_data(), "  first line  ");
    assert_eq!(snippet.get_attribute("maxLines"), Some("2"));

    let point = placemark.find_child(ElementId::Point).unwrap();
    assert_eq!(point.field_text(ElementId::Coordinates), Some("1,2,3"));
    assert_eq!(point.unknown_children()[0].id(), ElementId::Style);
    assert_eq!(document.warnings().len(), 1);

    let href = document
        .lookup_by_id("plain")
        .and_then(|style| style.find_child(ElementId::IconStyle))
        .and_then(|icon_style| icon_style.find_child(ElementId::Icon))
        .and_then(|icon| icon.field_text(ElementId::Href));
    assert_eq!(href, Some("http://example.com/icon.png?a=1&b=2"));
}

#[test]
fn known_content_is_reordered() {
    let compact = round_trip(
        "<kml><Placemark><Point/><visibility>1</visibility><name>a</name></Placemark></kml>",
        &SerializeOptions::default(),
    );
    assert_eq!(
        compact,
        r#"<?xml version="1.0" encoding="utf-8"?><kml><Placemark><name>a</name><visibility>1</visibility><Point/></Placemark></kml>"#
    );
}

#[test]
fn field_markup_survives() {
    let source = r#"<kml><Placemark id="p"><description>Hi <b>bold</b> there</description><name foo="bar">A<gx:x/></name></Placemark></kml>"#;
    let document = Document::parse(source).unwrap();
    let placemark = document.lookup_by_id("p").unwrap();
    assert_eq!(
        placemark.field_text(ElementId::Description),
        Some("Hi <b>bold</b> there")
    );
    assert_eq!(placemark.field_text(ElementId::Name), Some("A<gx:x/>"));
    let [Warning::DiscardedAttributes { field, .. }] = document.warnings() else {
        panic!("expected one warning, found {:?}", document.warnings());
    };
    assert_eq!(field, "name");

    let compact = round_trip(source, &SerializeOptions::default());
    assert_eq!(
        compact,
        r#"<?xml version="1.0" encoding="utf-8"?><kml><Placemark id="p"><name><![CDATA[A<gx:x/>]]></name><description><![CDATA[Hi <b>bold</b> there]]></description></Placemark></kml>"#
    );
    let reparsed = Document::parse(&compact).unwrap();
    let placemark = reparsed.lookup_by_id("p").unwrap();
    assert_eq!(
        placemark.field_text(ElementId::Description),
        Some("Hi <b>bold</b> there")
    );
    assert_eq!(placemark.field_text(ElementId::Name), Some("A<gx:x/>"));
    assert!(reparsed.warnings().is_empty());
}
