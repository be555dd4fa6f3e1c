//! Computed package parts: content types, relationship parts, the
//! presentation part and document properties.

use slidescan_core::types::{Deck, MediaFormat};

use crate::units::emu;

pub const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";
const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";

const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// `_rels/.rels`: the package entry points.
pub const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>
"#;

/// `docProps/core.xml`: minimal core properties.
pub const CORE_PROPS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:creator>slidescan</dc:creator><cp:revision>1</cp:revision></cp:coreProperties>
"#;

/// `[Content_Types].xml`: Defaults for rels/xml and every media
/// extension in use, plus one Override per XML part.
pub fn content_types_xml(slide_count: usize, media: &[MediaFormat]) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str("<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">");
    xml.push_str(&format!(
        "<Default Extension=\"rels\" ContentType=\"{CT_RELATIONSHIPS}\"/>"
    ));
    xml.push_str("<Default Extension=\"xml\" ContentType=\"application/xml\"/>");

    let mut seen: Vec<MediaFormat> = Vec::new();
    for format in media {
        if !seen.contains(format) {
            seen.push(*format);
            xml.push_str(&format!(
                "<Default Extension=\"{}\" ContentType=\"{}\"/>",
                format.extension(),
                format.content_type()
            ));
        }
    }

    xml.push_str(&format!(
        "<Override PartName=\"/ppt/presentation.xml\" ContentType=\"{CT_PRESENTATION}\"/>"
    ));
    xml.push_str(&format!(
        "<Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"{CT_SLIDE_MASTER}\"/>"
    ));
    xml.push_str(&format!(
        "<Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"{CT_SLIDE_LAYOUT}\"/>"
    ));
    xml.push_str(&format!(
        "<Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"{CT_THEME}\"/>"
    ));
    for index in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{index}.xml\" ContentType=\"{CT_SLIDE}\"/>"
        ));
    }
    xml.push_str(&format!(
        "<Override PartName=\"/docProps/core.xml\" ContentType=\"{CT_CORE_PROPS}\"/>"
    ));
    xml.push_str(&format!(
        "<Override PartName=\"/docProps/app.xml\" ContentType=\"{CT_APP_PROPS}\"/>"
    ));
    xml.push_str("</Types>");
    xml
}

/// `ppt/presentation.xml` with the resolved page size.
///
/// Slide ids count up from 256 and their relationship ids from rId2;
/// rId1 is the master. Same scheme whether the deck has zero slides or
/// a thousand.
pub fn presentation_xml(deck: &Deck) -> String {
    let cx = emu(deck.page_width_in);
    let cy = emu(deck.page_height_in);

    let mut xml = String::from(XML_DECL);
    xml.push_str("<p:presentation xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">");
    xml.push_str(
        "<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>",
    );
    if deck.slide_count() > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..deck.slide_count() {
            xml.push_str(&format!(
                "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
                256 + index,
                index + 2
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }
    xml.push_str(&format!("<p:sldSz cx=\"{cx}\" cy=\"{cy}\"/>"));
    xml.push_str("<p:notesSz cx=\"6858000\" cy=\"9144000\"/>");
    xml.push_str("</p:presentation>");
    xml
}

/// `ppt/_rels/presentation.xml.rels`: the master plus one entry per
/// slide, ids matching [`presentation_xml`].
pub fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    xml.push_str(&format!(
        "<Relationship Id=\"rId1\" Type=\"{REL_SLIDE_MASTER}\" Target=\"slideMasters/slideMaster1.xml\"/>"
    ));
    for index in 1..=slide_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"{REL_SLIDE}\" Target=\"slides/slide{index}.xml\"/>",
            index + 1
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// `docProps/app.xml` with the slide count.
pub fn app_props_xml(slide_count: usize) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str("<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">");
    xml.push_str("<Application>slidescan</Application>");
    xml.push_str(&format!("<Slides>{slide_count}</Slides>"));
    xml.push_str("</Properties>");
    xml
}
