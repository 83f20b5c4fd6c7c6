//! WordprocessingML (.docx) backend.

use sectora_core::error::ExportError;

use crate::markup::{Line, rendered_lines};
use crate::ooxml::{Package, XML_HEADER, escape};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Title colour (RGB 0, 112, 192).
const TITLE_COLOR: &str = "0070C0";

fn content_types() -> String {
    format!(
        r#"{XML_HEADER}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#
    )
}

fn package_rels() -> String {
    format!(
        r#"{XML_HEADER}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#
    )
}

fn document_rels() -> String {
    format!(
        r#"{XML_HEADER}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#
    )
}

fn core_props(title: &str) -> String {
    format!(
        r#"{XML_HEADER}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title></cp:coreProperties>"#,
        escape(title)
    )
}

// Sizes are in half-points: 22 = 11pt, 32 = 16pt, 48 = 24pt.
fn styles() -> String {
    format!(
        r#"{XML_HEADER}<w:styles xmlns:w="{W_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Malgun Gothic" w:eastAsia="Malgun Gothic" w:hAnsi="Malgun Gothic"/><w:sz w:val="22"/><w:lang w:eastAsia="ko-KR"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="300" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:jc w:val="center"/><w:spacing w:after="400"/></w:pPr><w:rPr><w:b/><w:color w:val="{TITLE_COLOR}"/><w:sz w:val="48"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="400" w:after="200"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style></w:styles>"#
    )
}

fn paragraph(style: Option<&str>, text: &str) -> String {
    let ppr = style
        .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{s}"/></w:pPr>"#))
        .unwrap_or_default();
    if text.is_empty() {
        return format!("<w:p>{ppr}</w:p>");
    }
    format!(
        r#"<w:p>{ppr}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}

/// Build `word/document.xml`: the title, a spacer paragraph, then one
/// heading or body paragraph per rendered line.
pub fn document_xml(title: &str, body: &str) -> String {
    let mut paras = String::new();
    paras.push_str(&paragraph(Some("Title"), title));
    paras.push_str(&paragraph(None, ""));
    for line in rendered_lines(body) {
        match line {
            Line::Heading(h) => paras.push_str(&paragraph(Some("Heading1"), h)),
            Line::Body(b) => paras.push_str(&paragraph(None, b)),
            Line::Blank | Line::Title(_) => {}
        }
    }
    format!(
        r#"{XML_HEADER}<w:document xmlns:w="{W_NS}"><w:body>{paras}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

/// Render a complete .docx package.
pub fn render(title: &str, body: &str) -> Result<Vec<u8>, ExportError> {
    let mut pkg = Package::new("docx");
    pkg.part("[Content_Types].xml", &content_types())?;
    pkg.part("_rels/.rels", &package_rels())?;
    pkg.part("docProps/core.xml", &core_props(title))?;
    pkg.part("word/_rels/document.xml.rels", &document_rels())?;
    pkg.part("word/styles.xml", &styles())?;
    pkg.part("word/document.xml", &document_xml(title, body))?;
    pkg.finish()
}
