//! Serialize a [`Deck`] into a PresentationML package.

use super::package::{content_types, rel_types, ContentTypes, Package, Relationships, XML_DECLARATION};
use super::template;
use crate::color::Rgb;
use crate::error::Result;
use crate::model::{
    Bullet, Canvas, Deck, OuterShadow, Paragraph, Picture, PictureLocks, Shape,
    Slide, TextAlignment, TextFrame, TextRun,
};

/// Application name written to document properties.
pub const APPLICATION: &str = "lyrics2pptx";

/// ID of the first slide in `p:sldIdLst`.
pub const FIRST_SLIDE_ID: u32 = 256;

/// ID of the only slide master.
pub const SLIDE_MASTER_ID: u32 = 2_147_483_648;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const SLIDE_MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
const SLIDE_LAYOUT_PART: &str = "ppt/slideLayouts/slideLayout1.xml";
const THEME_PART: &str = "ppt/theme/theme1.xml";
const PRES_PROPS_PART: &str = "ppt/presProps.xml";
const VIEW_PROPS_PART: &str = "ppt/viewProps.xml";
const TABLE_STYLES_PART: &str = "ppt/tableStyles.xml";
const CORE_PART: &str = "docProps/core.xml";
const APP_PART: &str = "docProps/app.xml";

const NS_DECLS: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// Font sizes PowerPoint accepts, in hundredths of a point.
const MIN_FONT_SIZE: f64 = 100.0;
const MAX_FONT_SIZE: f64 = 400_000.0;

/// Build the complete package for `deck`.
pub fn write_deck(deck: &Deck) -> Result<Package> {
    let mut package = Package::new();
    package.add_xml("[Content_Types].xml", content_types_for(deck).to_xml());

    let mut root_rels = Relationships::new();
    root_rels.add(rel_types::OFFICE_DOCUMENT, PRESENTATION_PART);
    root_rels.add(rel_types::CORE_PROPERTIES, CORE_PART);
    root_rels.add(rel_types::EXTENDED_PROPERTIES, APP_PART);
    package.add_relationships("", &root_rels);

    let mut pres_rels = Relationships::new();
    let master_rel = pres_rels.add(rel_types::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    let slide_rels: Vec<String> = (1..=deck.slide_count())
        .map(|n| pres_rels.add(rel_types::SLIDE, format!("slides/slide{}.xml", n)))
        .collect();
    pres_rels.add(rel_types::PRES_PROPS, "presProps.xml");
    pres_rels.add(rel_types::VIEW_PROPS, "viewProps.xml");
    pres_rels.add(rel_types::THEME, "theme/theme1.xml");
    pres_rels.add(rel_types::TABLE_STYLES, "tableStyles.xml");

    package.add_xml(
        PRESENTATION_PART,
        presentation_xml(deck.canvas, &master_rel, &slide_rels),
    );
    package.add_relationships(PRESENTATION_PART, &pres_rels);

    write_master_parts(&mut package);

    let mut media_count = 0usize;
    for (index, slide) in deck.slides.iter().enumerate() {
        let part = format!("ppt/slides/slide{}.xml", index + 1);

        let mut rels = Relationships::new();
        rels.add(rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        let mut image_rels = Vec::new();
        for picture in slide.pictures() {
            media_count += 1;
            let media = format!("image{}.png", media_count);
            image_rels.push(rels.add(rel_types::IMAGE, format!("../media/{}", media)));
            package.add_part(format!("ppt/media/{}", media), picture.data.clone());
        }

        package.add_xml(part.as_str(), slide_xml(slide, &image_rels));
        package.add_relationships(&part, &rels);
    }

    package.add_xml(CORE_PART, core_xml(&deck.title));
    package.add_xml(APP_PART, app_xml(deck.slide_count()));

    Ok(package)
}

/// Encode `deck` as .pptx bytes.
pub fn to_bytes(deck: &Deck) -> Result<Vec<u8>> {
    write_deck(deck)?.to_bytes()
}

fn content_types_for(deck: &Deck) -> ContentTypes {
    let mut types = ContentTypes::new();
    types.add_override("/ppt/presentation.xml", content_types::PRESENTATION);
    types.add_override(
        "/ppt/slideMasters/slideMaster1.xml",
        content_types::SLIDE_MASTER,
    );
    types.add_override(
        "/ppt/slideLayouts/slideLayout1.xml",
        content_types::SLIDE_LAYOUT,
    );
    for n in 1..=deck.slide_count() {
        types.add_override(&format!("/ppt/slides/slide{}.xml", n), content_types::SLIDE);
    }
    types.add_override("/ppt/theme/theme1.xml", content_types::THEME);
    types.add_override("/ppt/presProps.xml", content_types::PRES_PROPS);
    types.add_override("/ppt/viewProps.xml", content_types::VIEW_PROPS);
    types.add_override("/ppt/tableStyles.xml", content_types::TABLE_STYLES);
    types.add_override("/docProps/core.xml", content_types::CORE_PROPERTIES);
    types.add_override("/docProps/app.xml", content_types::EXTENDED_PROPERTIES);
    types
}

fn write_master_parts(package: &mut Package) {
    let mut master_rels = Relationships::new();
    master_rels.add(rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_rels.add(rel_types::THEME, "../theme/theme1.xml");
    package.add_xml(SLIDE_MASTER_PART, template::SLIDE_MASTER);
    package.add_relationships(SLIDE_MASTER_PART, &master_rels);

    let mut layout_rels = Relationships::new();
    layout_rels.add(rel_types::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    package.add_xml(SLIDE_LAYOUT_PART, template::TITLE_AND_CONTENT_LAYOUT);
    package.add_relationships(SLIDE_LAYOUT_PART, &layout_rels);

    package.add_xml(THEME_PART, template::THEME);
    package.add_xml(PRES_PROPS_PART, template::PRES_PROPS);
    package.add_xml(VIEW_PROPS_PART, template::VIEW_PROPS);
    package.add_xml(TABLE_STYLES_PART, template::TABLE_STYLES);
}

fn presentation_xml(canvas: Canvas, master_rel: &str, slide_rels: &[String]) -> String {
    let mut xml = String::with_capacity(1024 + slide_rels.len() * 48);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<p:presentation {} saveSubsetFonts="1">"#,
        NS_DECLS
    ));
    xml.push_str(&format!(
        r#"<p:sldMasterIdLst><p:sldMasterId id="{}" r:id="{}"/></p:sldMasterIdLst>"#,
        SLIDE_MASTER_ID, master_rel
    ));

    if !slide_rels.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (offset, rel_id) in slide_rels.iter().enumerate() {
            xml.push_str(&format!(
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + offset as u32,
                rel_id
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }

    let size_type = if canvas == Canvas::default() {
        r#" type="screen4x3""#
    } else {
        ""
    };
    xml.push_str(&format!(
        r#"<p:sldSz cx="{}" cy="{}"{}/>"#,
        canvas.width, canvas.height, size_type
    ));
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    xml
}

/// Slide XML; `image_rels[k]` is the relationship ID of the k-th picture.
fn slide_xml(slide: &Slide, image_rels: &[String]) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!("<p:sld {}>", NS_DECLS));
    xml.push_str("<p:cSld>");

    // Background must precede the shape tree
    if let Some(color) = slide.background {
        xml.push_str("<p:bg><p:bgPr>");
        write_solid_fill(&mut xml, color);
        xml.push_str("<a:effectLst/></p:bgPr></p:bg>");
    }

    xml.push_str("<p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(concat!(
        "<p:grpSpPr><a:xfrm>",
        r#"<a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
        r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/>"#,
        "</a:xfrm></p:grpSpPr>"
    ));

    let mut pictures = image_rels.iter();
    for (index, shape) in slide.shapes.iter().enumerate() {
        let id = index as u32 + 2;
        match shape {
            Shape::Title { frame } => {
                write_placeholder(&mut xml, id, &format!("Title {}", id - 1), r#"type="title""#, frame)
            }
            Shape::Body { frame } => write_placeholder(
                &mut xml,
                id,
                &format!("Content Placeholder {}", id - 1),
                r#"idx="1""#,
                frame,
            ),
            Shape::Picture(picture) => {
                if let Some(rel_id) = pictures.next() {
                    write_picture(&mut xml, id, picture, rel_id);
                }
            }
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    xml
}

fn write_placeholder(xml: &mut String, id: u32, name: &str, ph_attrs: &str, frame: &TextFrame) {
    xml.push_str("<p:sp><p:nvSpPr>");
    xml.push_str(&format!(
        r#"<p:cNvPr id="{}" name="{}"/>"#,
        id,
        xml_text(name)
    ));
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str(&format!("<p:nvPr><p:ph {}/></p:nvPr>", ph_attrs));
    xml.push_str("</p:nvSpPr><p:spPr/>");
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    for paragraph in &frame.paragraphs {
        write_paragraph(xml, paragraph);
    }
    xml.push_str("</p:txBody></p:sp>");
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph) {
    xml.push_str("<a:p>");

    let align = match paragraph.alignment {
        TextAlignment::Left => None,
        TextAlignment::Center => Some("ctr"),
    };
    let no_bullet = paragraph.bullet == Bullet::None;
    if align.is_some() || no_bullet {
        xml.push_str("<a:pPr");
        if let Some(align) = align {
            xml.push_str(&format!(r#" algn="{}""#, align));
        }
        if no_bullet {
            xml.push_str("><a:buNone/></a:pPr>");
        } else {
            xml.push_str("/>");
        }
    }

    let mut wrote_run = false;
    for run in paragraph.runs.iter().filter(|r| !r.is_empty()) {
        write_run(xml, run);
        wrote_run = true;
    }
    if !wrote_run {
        xml.push_str(r#"<a:endParaRPr lang="en-US" dirty="0"/>"#);
    }

    xml.push_str("</a:p>");
}

fn write_run(xml: &mut String, run: &TextRun) {
    let style = &run.style;
    xml.push_str(r#"<a:r><a:rPr lang="en-US""#);
    if let Some(size) = style.size {
        xml.push_str(&format!(r#" sz="{}""#, font_size_hundredths(size)));
    }
    if style.bold {
        xml.push_str(r#" b="1""#);
    }
    if style.underline {
        xml.push_str(r#" u="sng""#);
    }
    xml.push_str(r#" dirty="0""#);

    if style.color.is_none() && style.shadow.is_none() {
        xml.push_str("/>");
    } else {
        xml.push('>');
        if let Some(color) = style.color {
            write_solid_fill(xml, color);
        }
        if let Some(shadow) = &style.shadow {
            write_shadow(xml, shadow);
        }
        xml.push_str("</a:rPr>");
    }

    xml.push_str(&format!("<a:t>{}</a:t></a:r>", xml_text(&run.text)));
}

/// Point size as `a:rPr/@sz`, clamped to the range PowerPoint accepts.
pub fn font_size_hundredths(points: f64) -> u32 {
    (points * 100.0).round().clamp(MIN_FONT_SIZE, MAX_FONT_SIZE) as u32
}

fn write_solid_fill(xml: &mut String, color: Rgb) {
    xml.push_str(&format!(
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        color.to_hex()
    ));
}

fn write_shadow(xml: &mut String, shadow: &OuterShadow) {
    xml.push_str(&format!(
        r#"<a:effectLst><a:outerShdw blurRad="{}" dist="{}" dir="{}" algn="ctr" rotWithShape="{}">"#,
        shadow.blur_radius,
        shadow.distance,
        shadow.direction,
        if shadow.rotate_with_shape { 1 } else { 0 }
    ));
    xml.push_str(&format!(
        r#"<a:srgbClr val="{}"><a:alpha val="{}"/></a:srgbClr>"#,
        shadow.color.to_hex(),
        shadow.alpha
    ));
    xml.push_str("</a:outerShdw></a:effectLst>");
}

fn write_picture(xml: &mut String, id: u32, picture: &Picture, rel_id: &str) {
    xml.push_str("<p:pic><p:nvPicPr>");
    xml.push_str(&format!(
        r#"<p:cNvPr id="{}" name="{}"/>"#,
        id,
        xml_text(&picture.name)
    ));
    write_picture_locks(xml, &picture.locks);
    xml.push_str("<p:nvPr/></p:nvPicPr>");
    xml.push_str(&format!(
        r#"<p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
        rel_id
    ));
    xml.push_str(&format!(
        r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        picture.x, picture.y, picture.width, picture.height
    ));
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
    xml.push_str("</p:pic>");
}

fn write_picture_locks(xml: &mut String, locks: &PictureLocks) {
    if !locks.is_locked() {
        xml.push_str("<p:cNvPicPr/>");
        return;
    }
    xml.push_str("<p:cNvPicPr><a:picLocks");
    for (set, attr) in [
        (locks.no_group, "noGrp"),
        (locks.no_select, "noSelect"),
        (locks.no_rotate, "noRot"),
        (locks.no_change_aspect, "noChangeAspect"),
        (locks.no_move, "noMove"),
        (locks.no_resize, "noResize"),
    ] {
        if set {
            xml.push_str(&format!(r#" {}="1""#, attr));
        }
    }
    xml.push_str("/></p:cNvPicPr>");
}

fn core_xml(title: &str) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    xml.push_str(&format!("<dc:title>{}</dc:title>", xml_text(title)));
    xml.push_str(&format!("<dc:creator>{}</dc:creator>", APPLICATION));
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    xml.push_str(&format!("<Application>{}</Application>", APPLICATION));
    xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
    xml.push_str(&format!("<Slides>{}</Slides>", slide_count));
    xml.push_str("</Properties>");
    xml
}

/// Escape text for XML, dropping characters XML 1.0 cannot carry.
pub fn xml_text(text: &str) -> String {
    let cleaned: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    quick_xml::escape::escape(cleaned.as_str()).into_owned()
}

/// XML 1.0 `Char`, minus C1 controls.
fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{FFFE}' | '\u{FFFF}' => false,
        c => !c.is_control(),
    }
}
