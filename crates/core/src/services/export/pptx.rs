//! Slide deck assembly.
//!
//! No maintained pptx crate exists, so the deck is written directly as a
//! minimal OOXML presentation package: a fixed set of XML parts (content
//! types, relationships, one slide master/layout/theme) plus one slide
//! part per section. Everything except the slide text is a constant, so
//! output bytes are deterministic for identical input.

use std::io::{Cursor, Write};

use draftsmith_common::{AppError, AppResult};
use draftsmith_db::entities::{project, section};
use zip::{ZipWriter, write::SimpleFileOptions};

use super::ordered_sections;

const XMLNS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const XMLNS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XMLNS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const REL_TYPE_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_TYPE_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_TYPE_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_TYPE_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_TYPE_THEME: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

/// Build a slide deck for a project.
///
/// One title slide (project title + topic subtitle), then one content
/// slide per section in ascending order of the order field.
pub fn build_pptx(project: &project::Model, sections: &[section::Model]) -> AppResult<Vec<u8>> {
    let ordered = ordered_sections(sections);

    // Slide 1 is the title slide; sections follow.
    let mut slides = Vec::with_capacity(ordered.len() + 1);
    slides.push(slide_xml(&project.title, &project.topic, 4400));
    for section in &ordered {
        slides.push(slide_xml(
            &section.title,
            section.content.as_deref().unwrap_or(""),
            3200,
        ));
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let mut add = |name: &str, content: String| -> AppResult<()> {
        writer
            .start_file(name, options)
            .map_err(|e| AppError::Internal(format!("Failed to assemble pptx: {e}")))?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| AppError::Internal(format!("Failed to assemble pptx: {e}")))?;
        Ok(())
    };

    add("[Content_Types].xml", content_types_xml(slides.len()))?;
    add("_rels/.rels", package_rels_xml())?;
    add("ppt/presentation.xml", presentation_xml(slides.len()))?;
    add(
        "ppt/_rels/presentation.xml.rels",
        presentation_rels_xml(slides.len()),
    )?;
    add("ppt/slideMasters/slideMaster1.xml", slide_master_xml())?;
    add(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        slide_master_rels_xml(),
    )?;
    add("ppt/slideLayouts/slideLayout1.xml", slide_layout_xml())?;
    add(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        slide_layout_rels_xml(),
    )?;
    add("ppt/theme/theme1.xml", theme_xml())?;

    for (index, slide) in slides.iter().enumerate() {
        let number = index + 1;
        add(&format!("ppt/slides/slide{number}.xml"), slide.clone())?;
        add(
            &format!("ppt/slides/_rels/slide{number}.xml.rels"),
            slide_rels_xml(),
        )?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::Internal(format!("Failed to assemble pptx: {e}")))?;

    Ok(cursor.into_inner())
}

/// Escape text for embedding in XML character data or attribute values.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn content_types_xml(slide_count: usize) -> String {
    let mut overrides = String::new();
    for number in 1..=slide_count {
        overrides.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{number}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>"
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         {overrides}\
         </Types>"
    )
}

fn package_rels_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"{REL_TYPE_OFFICE_DOCUMENT}\" Target=\"ppt/presentation.xml\"/>\
         </Relationships>"
    )
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for number in 1..=slide_count {
        // Slide IDs start at 256 per the OOXML minimum; relationship rId1
        // is the master, so slides begin at rId2.
        let id = 255 + number;
        let rid = number + 1;
        slide_ids.push_str(&format!("<p:sldId id=\"{id}\" r:id=\"rId{rid}\"/>"));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:presentation xmlns:a=\"{XMLNS_A}\" xmlns:r=\"{XMLNS_R}\" xmlns:p=\"{XMLNS_P}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>{slide_ids}</p:sldIdLst>\
         <p:sldSz cx=\"9144000\" cy=\"6858000\"/>\
         <p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>"
    )
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut relationships = format!(
        "<Relationship Id=\"rId1\" Type=\"{REL_TYPE_SLIDE_MASTER}\" Target=\"slideMasters/slideMaster1.xml\"/>"
    );
    for number in 1..=slide_count {
        let rid = number + 1;
        relationships.push_str(&format!(
            "<Relationship Id=\"rId{rid}\" Type=\"{REL_TYPE_SLIDE}\" Target=\"slides/slide{number}.xml\"/>"
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         {relationships}\
         </Relationships>"
    )
}

fn slide_master_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldMaster xmlns:a=\"{XMLNS_A}\" xmlns:r=\"{XMLNS_R}\" xmlns:p=\"{XMLNS_P}\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr/>\
         </p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" \
          accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" \
          accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         </p:sldMaster>"
    )
}

fn slide_master_rels_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"{REL_TYPE_SLIDE_LAYOUT}\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"{REL_TYPE_THEME}\" Target=\"../theme/theme1.xml\"/>\
         </Relationships>"
    )
}

fn slide_layout_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldLayout xmlns:a=\"{XMLNS_A}\" xmlns:r=\"{XMLNS_R}\" xmlns:p=\"{XMLNS_P}\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr/>\
         </p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sldLayout>"
    )
}

fn slide_layout_rels_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"{REL_TYPE_SLIDE_MASTER}\" Target=\"../slideMasters/slideMaster1.xml\"/>\
         </Relationships>"
    )
}

fn slide_rels_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"{REL_TYPE_SLIDE_LAYOUT}\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
         </Relationships>"
    )
}

/// One slide: a bold heading shape on top and a body shape below it.
///
/// Body text is split on newlines into separate paragraphs; an empty body
/// still emits one empty paragraph, which the format requires.
fn slide_xml(heading: &str, body: &str, heading_size: u32) -> String {
    // Splitting an empty body still yields one empty line, so every text
    // body gets at least one paragraph element.
    let mut body_paragraphs = String::new();
    for line in body.split('\n') {
        if line.is_empty() {
            body_paragraphs.push_str("<a:p/>");
        } else {
            body_paragraphs.push_str(&format!(
                "<a:p><a:r><a:rPr lang=\"en-US\" sz=\"1800\"/><a:t>{}</a:t></a:r></a:p>",
                xml_escape(line)
            ));
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sld xmlns:a=\"{XMLNS_A}\" xmlns:r=\"{XMLNS_R}\" xmlns:p=\"{XMLNS_P}\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr/>\
         <p:sp>\
         <p:nvSpPr><p:cNvPr id=\"2\" name=\"Title\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"457200\" y=\"274638\"/><a:ext cx=\"8229600\" cy=\"1143000\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/>\
         <a:p><a:r><a:rPr lang=\"en-US\" sz=\"{heading_size}\" b=\"1\"/><a:t>{heading}</a:t></a:r></a:p>\
         </p:txBody>\
         </p:sp>\
         <p:sp>\
         <p:nvSpPr><p:cNvPr id=\"3\" name=\"Body\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"457200\" y=\"1600200\"/><a:ext cx=\"8229600\" cy=\"4525963\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/>{body_paragraphs}</p:txBody>\
         </p:sp>\
         </p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sld>",
        heading = xml_escape(heading),
    )
}

fn theme_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <a:theme xmlns:a=\"{XMLNS_A}\" name=\"Office Theme\">\
         <a:themeElements>\
         <a:clrScheme name=\"Office\">\
         <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
         <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
         <a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
         <a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
         <a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
         <a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
         <a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"Office\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"Office\">\
         <a:fillStyleLst>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         </a:fillStyleLst>\
         <a:lnStyleLst>\
         <a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         <a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         <a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         </a:lnStyleLst>\
         <a:effectStyleLst>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         </a:effectStyleLst>\
         <a:bgFillStyleLst>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         </a:bgFillStyleLst>\
         </a:fmtScheme>\
         </a:themeElements>\
         </a:theme>"
    )
}
