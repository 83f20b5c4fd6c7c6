//! PresentationML (.pptx) backend.
//!
//! The deck is a title slide followed by one slide per `## ` heading, with
//! the heading's body lines as 14pt bullets. Body text that appears before
//! the first heading has no slide to land on and is dropped.

use sectora_core::error::ExportError;

use crate::markup::outline;
use crate::ooxml::{Package, XML_HEADER, escape};

/// 10in x 7.5in in EMU.
const SLIDE_CX: u64 = 9_144_000;
const SLIDE_CY: u64 = 6_858_000;

const EMU_PER_INCH: u64 = 914_400;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// One slide's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    Title(String),
    Section { heading: String, bullets: Vec<String> },
}

/// Split a report into slides.
pub fn slides(title: &str, body: &str) -> Vec<Slide> {
    let mut out = vec![Slide::Title(title.to_string())];
    for (heading, lines) in outline(body).sections {
        out.push(Slide::Section {
            heading: heading.to_string(),
            bullets: lines.into_iter().map(str::to_string).collect(),
        });
    }
    out
}

fn content_types(slide_count: usize) -> String {
    let slides: String = (1..=slide_count)
        .map(|n| {
            format!(
                r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
            )
        })
        .collect();
    format!(
        r#"{XML_HEADER}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>{slides}</Types>"#
    )
}

fn package_rels() -> String {
    format!(
        r#"{XML_HEADER}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_TYPE}/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#
    )
}

// rId1 is the master; slides start at rId2.
fn presentation(slide_count: usize) -> String {
    let ids: String = (1..=slide_count)
        .map(|n| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 1))
        .collect();
    format!(
        r#"{XML_HEADER}<p:presentation {NS}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{ids}</p:sldIdLst><p:sldSz cx="{SLIDE_CX}" cy="{SLIDE_CY}"/><p:notesSz cx="{SLIDE_CY}" cy="{SLIDE_CX}"/></p:presentation>"#
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let slides: String = (1..=slide_count)
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{}" Type="{REL_TYPE}/slide" Target="slides/slide{n}.xml"/>"#,
                n + 1
            )
        })
        .collect();
    format!(
        r#"{XML_HEADER}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_TYPE}/slideMaster" Target="slideMasters/slideMaster1.xml"/>{slides}</Relationships>"#
    )
}

const EMPTY_TREE: &str = r#"<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld>"#;

fn slide_master() -> String {
    format!(
        r#"{XML_HEADER}<p:sldMaster {NS}>{EMPTY_TREE}<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#
    )
}

fn slide_master_rels() -> String {
    format!(
        r#"{XML_HEADER}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_TYPE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{REL_TYPE}/theme" Target="../theme/theme1.xml"/></Relationships>"#
    )
}

fn slide_layout() -> String {
    format!(
        r#"{XML_HEADER}<p:sldLayout {NS} type="blank" preserve="1">{EMPTY_TREE}<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
    )
}

fn slide_layout_rels() -> String {
    format!(
        r#"{XML_HEADER}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_TYPE}/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
    )
}

fn slide_rels() -> String {
    format!(
        r#"{XML_HEADER}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_TYPE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#
    )
}

fn theme() -> String {
    let sys = |name: &str, val: &str| format!(r#"<a:{name}><a:srgbClr val="{val}"/></a:{name}>"#);
    let colours = [
        sys("dk1", "000000"),
        sys("lt1", "FFFFFF"),
        sys("dk2", "1F497D"),
        sys("lt2", "EEECE1"),
        sys("accent1", "0070C0"),
        sys("accent2", "C0504D"),
        sys("accent3", "9BBB59"),
        sys("accent4", "8064A2"),
        sys("accent5", "4BACC6"),
        sys("accent6", "F79646"),
        sys("hlink", "0000FF"),
        sys("folHlink", "800080"),
    ]
    .concat();
    let fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = r#"<a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#;
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";
    format!(
        r#"{XML_HEADER}<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Sectora"><a:themeElements><a:clrScheme name="Sectora">{colours}</a:clrScheme><a:fontScheme name="Sectora"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface="Malgun Gothic"/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface="Malgun Gothic"/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Sectora"><a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst><a:lnStyleLst>{line}{line}{line}</a:lnStyleLst><a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst><a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#
    )
}

struct Frame {
    x: u64,
    y: u64,
    cx: u64,
    cy: u64,
}

fn text_box(id: u32, name: &str, frame: Frame, paragraphs: &str) -> String {
    let Frame { x, y, cx, cy } = frame;
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr wrap="square"><a:normAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#
    )
}

fn run(text: &str, size_hundredths: u32, bold: bool) -> String {
    let b = if bold { r#" b="1""# } else { "" };
    format!(
        r#"<a:r><a:rPr lang="ko-KR" sz="{size_hundredths}"{b} dirty="0"/><a:t>{}</a:t></a:r>"#,
        escape(text)
    )
}

fn slide_xml(slide: &Slide) -> String {
    let inch = EMU_PER_INCH;
    let shapes = match slide {
        Slide::Title(title) => text_box(
            2,
            "Title",
            Frame {
                x: inch / 2,
                y: inch * 5 / 2,
                cx: SLIDE_CX - inch,
                cy: inch * 3 / 2,
            },
            &format!(
                r#"<a:p><a:pPr algn="ctr"/>{}</a:p>"#,
                run(title, 3600, true)
            ),
        ),
        Slide::Section { heading, bullets } => {
            let title = text_box(
                2,
                "Title",
                Frame {
                    x: inch / 2,
                    y: inch / 3,
                    cx: SLIDE_CX - inch,
                    cy: inch,
                },
                &format!("<a:p>{}</a:p>", run(heading, 2800, true)),
            );
            let paras: String = if bullets.is_empty() {
                "<a:p><a:endParaRPr lang=\"ko-KR\" sz=\"1400\"/></a:p>".to_string()
            } else {
                bullets
                    .iter()
                    .map(|b| {
                        format!(
                            r#"<a:p><a:pPr marL="285750" indent="-285750"><a:buChar char="•"/></a:pPr>{}</a:p>"#,
                            run(b, 1400, false)
                        )
                    })
                    .collect()
            };
            let body = text_box(
                3,
                "Content",
                Frame {
                    x: inch / 2,
                    y: inch * 3 / 2,
                    cx: SLIDE_CX - inch,
                    cy: SLIDE_CY - inch * 2,
                },
                &paras,
            );
            format!("{title}{body}")
        }
    };
    format!(
        r#"{XML_HEADER}<p:sld {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    )
}

/// Render a complete .pptx package.
pub fn render(title: &str, body: &str) -> Result<Vec<u8>, ExportError> {
    let deck = slides(title, body);
    let count = deck.len();

    let mut pkg = Package::new("pptx");
    pkg.part("[Content_Types].xml", &content_types(count))?;
    pkg.part("_rels/.rels", &package_rels())?;
    pkg.part("ppt/presentation.xml", &presentation(count))?;
    pkg.part("ppt/_rels/presentation.xml.rels", &presentation_rels(count))?;
    pkg.part("ppt/slideMasters/slideMaster1.xml", &slide_master())?;
    pkg.part(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &slide_master_rels(),
    )?;
    pkg.part("ppt/slideLayouts/slideLayout1.xml", &slide_layout())?;
    pkg.part(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        &slide_layout_rels(),
    )?;
    pkg.part("ppt/theme/theme1.xml", &theme())?;
    for (i, slide) in deck.iter().enumerate() {
        let n = i + 1;
        pkg.part(&format!("ppt/slides/slide{n}.xml"), &slide_xml(slide))?;
        pkg.part(&format!("ppt/slides/_rels/slide{n}.xml.rels"), &slide_rels())?;
    }
    pkg.finish()
}
