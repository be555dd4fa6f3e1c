//! Per-slide parts: the slide XML with its picture and caption box,
//! and the slide's relationship part pointing at layout and media.

use quick_xml::escape::escape;
use slidescan_core::types::{MediaFormat, Slide};

use crate::package::XML_DECL;
use crate::units::{centipoints, emu};

const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Build `ppt/slides/slideN.xml` for one slide.
///
/// The shape tree holds exactly two shapes: the picture (rId2 in the
/// slide's rels) and the caption text box below it. Positions come in
/// as inches and leave as EMU.
pub fn slide_xml(slide: &Slide) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str("<p:sld xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">");
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str("<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/><a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>");
    xml.push_str(&picture_xml(slide));
    xml.push_str(&textbox_xml(slide));
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    xml
}

fn picture_xml(slide: &Slide) -> String {
    let x = emu(slide.image_rect.left);
    let y = emu(slide.image_rect.top);
    let cx = emu(slide.image_rect.width);
    let cy = emu(slide.image_rect.height);

    let mut xml = String::from("<p:pic>");
    xml.push_str(&format!(
        "<p:nvPicPr><p:cNvPr id=\"2\" name=\"Picture 2\" descr=\"{}\"/>",
        escape(&slide.file_name)
    ));
    xml.push_str("<p:cNvPicPr><a:picLocks noChangeAspect=\"1\"/></p:cNvPicPr>");
    xml.push_str("<p:nvPr/></p:nvPicPr>");
    xml.push_str("<p:blipFill><a:blip r:embed=\"rId2\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>");
    xml.push_str("<p:spPr><a:xfrm>");
    xml.push_str(&format!("<a:off x=\"{x}\" y=\"{y}\"/>"));
    xml.push_str(&format!("<a:ext cx=\"{cx}\" cy=\"{cy}\"/>"));
    xml.push_str("</a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>");
    xml.push_str("</p:pic>");
    xml
}

fn textbox_xml(slide: &Slide) -> String {
    let x = emu(slide.textbox_rect.left);
    let y = emu(slide.textbox_rect.top);
    let cx = emu(slide.textbox_rect.width);
    let cy = emu(slide.textbox_rect.height);
    let sz = centipoints(slide.font_size_pt);

    let mut xml = String::from("<p:sp>");
    xml.push_str("<p:nvSpPr><p:cNvPr id=\"3\" name=\"TextBox 3\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>");
    xml.push_str("<p:spPr><a:xfrm>");
    xml.push_str(&format!("<a:off x=\"{x}\" y=\"{y}\"/>"));
    xml.push_str(&format!("<a:ext cx=\"{cx}\" cy=\"{cy}\"/>"));
    xml.push_str("</a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>");
    xml.push_str("<p:txBody><a:bodyPr wrap=\"square\" rtlCol=\"0\"/><a:lstStyle/>");

    let mut paragraphs = 0;
    for line in slide.text.lines() {
        if line.is_empty() {
            xml.push_str(&format!("<a:p><a:endParaRPr lang=\"en-US\" sz=\"{sz}\"/></a:p>"));
        } else {
            xml.push_str(&format!(
                "<a:p><a:r><a:rPr lang=\"en-US\" sz=\"{sz}\" dirty=\"0\"/><a:t>{}</a:t></a:r></a:p>",
                escape(line)
            ));
        }
        paragraphs += 1;
    }
    // A txBody must hold at least one paragraph even when OCR came up
    // empty.
    if paragraphs == 0 {
        xml.push_str(&format!("<a:p><a:endParaRPr lang=\"en-US\" sz=\"{sz}\"/></a:p>"));
    }

    xml.push_str("</p:txBody></p:sp>");
    xml
}

/// Build `ppt/slides/_rels/slideN.xml.rels`: the blank layout plus the
/// slide's image under `../media/`.
pub fn slide_rels_xml(slide_number: usize, format: MediaFormat) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    xml.push_str(&format!(
        "<Relationship Id=\"rId1\" Type=\"{REL_SLIDE_LAYOUT}\" Target=\"../slideLayouts/slideLayout1.xml\"/>"
    ));
    xml.push_str(&format!(
        "<Relationship Id=\"rId2\" Type=\"{REL_IMAGE}\" Target=\"../media/image{slide_number}.{}\"/>",
        format.extension()
    ));
    xml.push_str("</Relationships>");
    xml
}
